use game_types::{
    GameError, GameIntent, GamePhase, GameState, Guess, ImageRef, PALETTE, Player, PlayerColor,
    PlayerId, Point,
};
use tracing::{debug, info};

use crate::{DistanceLine, GameEvent, GameEventBus, GameEventHandler, GameRules, ScoringEngine};

/// Setup: the setter may or may not have clicked the target yet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetupPhase {
    pub target_point: Option<Point>,
}

impl SetupPhase {
    /// Leave setup. Only possible once a target exists.
    pub fn start(&self) -> Result<PlayingPhase, GameError> {
        let target_point = self.target_point.ok_or(GameError::TargetMissing)?;
        Ok(PlayingPhase {
            target_point,
            turn: None,
        })
    }
}

/// The player currently placing a marker
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveTurn {
    pub player_id: PlayerId,
    pub pending_guess: Option<Point>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayingPhase {
    pub target_point: Point,
    pub turn: Option<ActiveTurn>,
}

impl PlayingPhase {
    pub fn reveal(&self) -> ResultsPhase {
        ResultsPhase {
            target_point: self.target_point,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultsPhase {
    pub target_point: Point,
}

/// Phase together with the data that only exists in that phase.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Setup(SetupPhase),
    Playing(PlayingPhase),
    Results(ResultsPhase),
}

impl Phase {
    pub fn kind(&self) -> GamePhase {
        match self {
            Phase::Setup(_) => GamePhase::Setup,
            Phase::Playing(_) => GamePhase::Playing,
            Phase::Results(_) => GamePhase::Results,
        }
    }

    pub fn target_point(&self) -> Option<Point> {
        match self {
            Phase::Setup(setup) => setup.target_point,
            Phase::Playing(playing) => Some(playing.target_point),
            Phase::Results(results) => Some(results.target_point),
        }
    }

    fn turn(&self) -> Option<&ActiveTurn> {
        match self {
            Phase::Playing(playing) => playing.turn.as_ref(),
            _ => None,
        }
    }
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Setup(SetupPhase::default())
    }
}

fn rejected(operation: &'static str, err: GameError) -> GameError {
    debug!(operation, error = %err, "operation rejected");
    err
}

fn ensure_in_bounds(point: &Point) -> Result<(), GameError> {
    if point.is_within_bounds() {
        Ok(())
    } else {
        Err(GameError::PointOutOfBounds { x: point.x, y: point.y })
    }
}

/// Owns the whole game and is the only thing that mutates it.
///
/// Every operation either succeeds or returns a [`GameError`] and leaves the
/// game exactly as it was. Callers that only care about the happy path may
/// ignore the error.
#[derive(Debug)]
pub struct LocationGame {
    phase: Phase,
    players: Vec<Player>,
    guesses: Vec<Guess>,
    image: Option<ImageRef>,
    question: String,
    rules: GameRules,
    next_player_id: u32,
    event_bus: GameEventBus,
}

impl LocationGame {
    pub fn new(rules: GameRules) -> Self {
        Self {
            phase: Phase::default(),
            players: Vec::new(),
            guesses: Vec::new(),
            image: None,
            question: String::new(),
            rules,
            next_player_id: 1,
            event_bus: GameEventBus::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn GameEventHandler>) {
        self.event_bus.add_handler(handler);
    }

    /// Apply one intent from the presentation layer
    pub fn dispatch(&mut self, intent: GameIntent) -> Result<(), GameError> {
        match intent {
            GameIntent::UploadImage { image } => self.upload_image(image).map(|_| ()),
            GameIntent::SetTargetPoint { point } => self.set_target_point(point),
            GameIntent::AddPlayer { name } => self.add_player(&name).map(|_| ()),
            GameIntent::RemovePlayer { player_id } => self.remove_player(player_id).map(|_| ()),
            GameIntent::SetQuestion { question } => self.set_question(&question),
            GameIntent::StartGame => self.start_game(),
            GameIntent::SelectCurrentPlayer { player_id } => self.select_current_player(player_id),
            GameIntent::SetPendingGuess { point } => self.set_pending_guess(point),
            GameIntent::PlaceMarker { point } => self.place_marker(point),
            GameIntent::ConfirmGuess => self.confirm_guess().map(|_| ()),
            GameIntent::RevealResults => self.reveal_results(),
            GameIntent::ResetGame => {
                self.reset_game();
                Ok(())
            }
        }
    }

    fn require_setup(&self, operation: &'static str) -> Result<(), GameError> {
        match self.phase {
            Phase::Setup(_) => Ok(()),
            _ => Err(rejected(operation, self.wrong_phase())),
        }
    }

    fn wrong_phase(&self) -> GameError {
        GameError::WrongPhase {
            current: self.phase.kind(),
        }
    }

    /// Store the decoded image. `None` (the picker was dismissed) is a no-op
    /// and returns `Ok(false)`. A later upload replaces an earlier one.
    pub fn upload_image(&mut self, image: Option<ImageRef>) -> Result<bool, GameError> {
        let Some(image) = image else {
            return Ok(false);
        };
        self.require_setup("upload_image")?;

        self.image = Some(image);
        info!("Image uploaded");
        self.event_bus.publish(GameEvent::ImageUploaded);
        Ok(true)
    }

    pub fn set_target_point(&mut self, point: Point) -> Result<(), GameError> {
        self.require_setup("set_target_point")?;
        if self.image.is_none() {
            return Err(rejected("set_target_point", GameError::ImageMissing));
        }
        ensure_in_bounds(&point).map_err(|e| rejected("set_target_point", e))?;

        if let Phase::Setup(setup) = &mut self.phase {
            setup.target_point = Some(point);
        }
        debug!("Target point set at ({:.1}, {:.1})", point.x, point.y);
        self.event_bus.publish(GameEvent::TargetPointSet { point });
        Ok(())
    }

    fn check_add_player(&self, name: &str) -> Result<PlayerColor, GameError> {
        if !matches!(self.phase, Phase::Setup(_)) {
            return Err(self.wrong_phase());
        }
        if name.trim().is_empty() {
            return Err(GameError::EmptyPlayerName);
        }
        PlayerColor::for_index(self.players.len()).ok_or(GameError::PaletteExhausted {
            limit: PALETTE.len() as u32,
        })
    }

    /// Add a player with the next palette colour. Names are trimmed; duplicates are allowed.
    pub fn add_player(&mut self, name: &str) -> Result<PlayerId, GameError> {
        let color = self
            .check_add_player(name)
            .map_err(|e| rejected("add_player", e))?;

        let id = PlayerId(self.next_player_id);
        self.next_player_id += 1;

        let player = Player {
            id,
            name: name.trim().to_string(),
            color,
        };
        info!("Player {} '{}' joined with colour {}", id, player.name, player.color.as_str());
        self.players.push(player.clone());
        self.event_bus.publish(GameEvent::PlayerAdded { player });
        Ok(id)
    }

    /// Returns `Ok(false)` when no player has that id.
    pub fn remove_player(&mut self, player_id: PlayerId) -> Result<bool, GameError> {
        self.require_setup("remove_player")?;

        let Some(index) = self.players.iter().position(|p| p.id == player_id) else {
            return Ok(false);
        };
        let player = self.players.remove(index);
        info!("Player {} '{}' removed", player.id, player.name);
        self.event_bus.publish(GameEvent::PlayerRemoved { player_id });
        Ok(true)
    }

    pub fn set_question(&mut self, question: &str) -> Result<(), GameError> {
        self.require_setup("set_question")?;

        self.question = question.to_string();
        self.event_bus.publish(GameEvent::QuestionChanged {
            question: question.to_string(),
        });
        Ok(())
    }

    fn check_start(&self) -> Result<PlayingPhase, GameError> {
        let Phase::Setup(setup) = &self.phase else {
            return Err(self.wrong_phase());
        };
        if self.players.len() < self.rules.min_players() {
            return Err(GameError::NotEnoughPlayers {
                required: self.rules.min_players() as u32,
                actual: self.players.len() as u32,
            });
        }
        if self.image.is_none() {
            return Err(GameError::ImageMissing);
        }
        if self.rules.require_question() && self.question.trim().is_empty() {
            return Err(GameError::QuestionMissing);
        }
        setup.start()
    }

    pub fn start_game(&mut self) -> Result<(), GameError> {
        let playing = self.check_start().map_err(|e| rejected("start_game", e))?;

        self.phase = Phase::Playing(playing);
        info!("Game started with {} players", self.players.len());
        self.event_bus.publish(GameEvent::GameStarted {
            player_count: self.players.len(),
        });
        Ok(())
    }

    pub fn select_current_player(&mut self, player_id: PlayerId) -> Result<(), GameError> {
        let Phase::Playing(playing) = &self.phase else {
            return Err(rejected("select_current_player", self.wrong_phase()));
        };
        if playing.turn.is_some() {
            return Err(rejected("select_current_player", GameError::TurnInProgress));
        }
        if !self.players.iter().any(|p| p.id == player_id) {
            return Err(rejected(
                "select_current_player",
                GameError::PlayerNotFound { player_id },
            ));
        }
        if self.has_guessed(player_id) {
            return Err(rejected(
                "select_current_player",
                GameError::AlreadyGuessed { player_id },
            ));
        }

        if let Phase::Playing(playing) = &mut self.phase {
            playing.turn = Some(ActiveTurn {
                player_id,
                pending_guess: None,
            });
        }
        debug!("Player {} is placing a guess", player_id);
        self.event_bus.publish(GameEvent::TurnStarted { player_id });
        Ok(())
    }

    /// Place or move the active player's marker
    pub fn set_pending_guess(&mut self, point: Point) -> Result<(), GameError> {
        let Some(turn) = self.phase.turn() else {
            let err = match self.phase {
                Phase::Playing(_) => GameError::NoActivePlayer,
                _ => self.wrong_phase(),
            };
            return Err(rejected("set_pending_guess", err));
        };
        let player_id = turn.player_id;
        ensure_in_bounds(&point).map_err(|e| rejected("set_pending_guess", e))?;

        if let Phase::Playing(PlayingPhase {
            turn: Some(turn), ..
        }) = &mut self.phase
        {
            turn.pending_guess = Some(point);
        }
        debug!("Player {} placed marker at ({:.1}, {:.1})", player_id, point.x, point.y);
        self.event_bus
            .publish(GameEvent::PendingGuessPlaced { player_id, point });
        Ok(())
    }

    /// A click on the image: sets the target during setup, moves the
    /// active player's marker while playing.
    pub fn place_marker(&mut self, point: Point) -> Result<(), GameError> {
        match self.phase.kind() {
            GamePhase::Setup => self.set_target_point(point),
            GamePhase::Playing => self.set_pending_guess(point),
            GamePhase::Results => Err(rejected("place_marker", self.wrong_phase())),
        }
    }

    /// Lock in the active player's marker. The distance is computed once,
    /// here, and never again.
    pub fn confirm_guess(&mut self) -> Result<Guess, GameError> {
        let Phase::Playing(playing) = &self.phase else {
            return Err(rejected("confirm_guess", self.wrong_phase()));
        };
        let Some(turn) = playing.turn.as_ref() else {
            return Err(rejected("confirm_guess", GameError::NoActivePlayer));
        };
        let Some(point) = turn.pending_guess else {
            return Err(rejected("confirm_guess", GameError::NoPendingGuess));
        };
        let Some(player) = self.players.iter().find(|p| p.id == turn.player_id) else {
            return Err(rejected(
                "confirm_guess",
                GameError::PlayerNotFound {
                    player_id: turn.player_id,
                },
            ));
        };

        let guess = Guess {
            point,
            distance: ScoringEngine::distance(&point, &playing.target_point),
            player_id: player.id,
            player_name: player.name.clone(),
            color: player.color.clone(),
        };

        if let Phase::Playing(playing) = &mut self.phase {
            playing.turn = None;
        }
        self.guesses.push(guess.clone());
        info!(
            "Player {} confirmed a guess {:.1} units from the target",
            guess.player_id, guess.distance
        );
        self.event_bus.publish(GameEvent::GuessConfirmed {
            guess: guess.clone(),
        });
        Ok(guess)
    }

    fn check_reveal(&self) -> Result<ResultsPhase, GameError> {
        let Phase::Playing(playing) = &self.phase else {
            return Err(self.wrong_phase());
        };
        let remaining = self.remaining_players().len();
        if remaining > 0 || self.guesses.len() != self.players.len() {
            return Err(GameError::GuessesOutstanding {
                remaining: remaining as u32,
            });
        }
        Ok(playing.reveal())
    }

    pub fn reveal_results(&mut self) -> Result<(), GameError> {
        let results = self.check_reveal().map_err(|e| rejected("reveal_results", e))?;

        self.phase = Phase::Results(results);
        info!("Results revealed for {} guesses", self.guesses.len());
        let podium = self.podium();
        self.event_bus.publish(GameEvent::ResultsRevealed { podium });
        Ok(())
    }

    /// Back to an empty setup. The question text is kept for the next round.
    pub fn reset_game(&mut self) {
        self.phase = Phase::default();
        self.players.clear();
        self.guesses.clear();
        self.image = None;
        info!("Game reset");
        self.event_bus.publish(GameEvent::GameReset);
    }

    pub fn phase(&self) -> GamePhase {
        self.phase.kind()
    }

    pub fn phase_state(&self) -> &Phase {
        &self.phase
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn guesses(&self) -> &[Guess] {
        &self.guesses
    }

    pub fn target_point(&self) -> Option<Point> {
        self.phase.target_point()
    }

    pub fn image(&self) -> Option<&ImageRef> {
        self.image.as_ref()
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn current_player(&self) -> Option<&Player> {
        let turn = self.phase.turn()?;
        self.players.iter().find(|p| p.id == turn.player_id)
    }

    pub fn pending_guess(&self) -> Option<Point> {
        self.phase.turn().and_then(|turn| turn.pending_guess)
    }

    pub fn has_guessed(&self, player_id: PlayerId) -> bool {
        self.guesses.iter().any(|g| g.player_id == player_id)
    }

    /// Players without a confirmed guess, in join order
    pub fn remaining_players(&self) -> Vec<&Player> {
        self.players
            .iter()
            .filter(|p| !self.has_guessed(p.id))
            .collect()
    }

    pub fn can_add_player(&self, name: &str) -> bool {
        self.check_add_player(name).is_ok()
    }

    pub fn can_start_game(&self) -> bool {
        self.check_start().is_ok()
    }

    /// The first reason `start_game` would be refused right now, if any
    pub fn start_blocker(&self) -> Option<GameError> {
        self.check_start().err()
    }

    pub fn can_reveal_results(&self) -> bool {
        self.check_reveal().is_ok()
    }

    /// Top three guesses, closest first
    pub fn podium(&self) -> Vec<Guess> {
        ScoringEngine::rank_guesses(&self.guesses)
    }

    /// Guess-to-target lines drawn on the results screen. Empty before results.
    pub fn distance_lines(&self) -> Vec<DistanceLine> {
        match &self.phase {
            Phase::Results(results) => {
                crate::geometry::distance_lines(&self.guesses, &results.target_point)
            }
            _ => Vec::new(),
        }
    }

    pub fn snapshot(&self) -> GameState {
        let turn = self.phase.turn();
        GameState {
            phase: self.phase.kind(),
            target_point: self.phase.target_point(),
            players: self.players.clone(),
            guesses: self.guesses.clone(),
            image: self.image.clone(),
            question: self.question.clone(),
            current_player: turn.map(|t| t.player_id),
            pending_guess: turn.and_then(|t| t.pending_guess),
        }
    }
}

impl Default for LocationGame {
    fn default() -> Self {
        Self::new(GameRules::default())
    }
}
