#![allow(dead_code)]

use game_core::{GameEvent, GameEventHandler, GameRules, LocationGame};
use game_types::{GamePhase, Guess, ImageRef, Player, PlayerId, Point};
use std::sync::{Arc, Mutex};

/// A tiny stand-in for an uploaded picture
pub fn create_test_image() -> ImageRef {
    ImageRef("data:image/png;base64,iVBORw0KGgo=".to_string())
}

/// Creates a game in setup with an image but nothing else
pub fn create_game_with_image() -> LocationGame {
    let mut game = LocationGame::default();
    game.upload_image(Some(create_test_image())).unwrap();
    game
}

/// Creates a startable game with the given players and target
pub fn create_ready_game(names: &[&str], target: Point) -> LocationGame {
    let mut game = create_game_with_image();
    game.set_target_point(target).unwrap();
    game.set_question("Where was this photo taken?").unwrap();
    for name in names {
        game.add_player(name).unwrap();
    }
    game
}

/// Creates a game already in the playing phase
pub fn create_playing_game(names: &[&str], target: Point) -> LocationGame {
    let mut game = create_ready_game(names, target);
    game.start_game().unwrap();
    game
}

/// Creates a game whose rules don't ask for a question
pub fn create_game_without_question_rule() -> LocationGame {
    LocationGame::new(GameRules::new(2, false))
}

/// Helper to get player by name
pub fn get_player_by_name<'a>(game: &'a LocationGame, name: &str) -> Option<&'a Player> {
    game.players().iter().find(|p| p.name == name)
}

pub fn player_id(game: &LocationGame, name: &str) -> PlayerId {
    get_player_by_name(game, name)
        .unwrap_or_else(|| panic!("no player named {}", name))
        .id
}

/// Runs a full turn for a player: select, place marker, confirm
pub fn play_turn(game: &mut LocationGame, name: &str, point: Point) -> Guess {
    let id = player_id(game, name);
    game.select_current_player(id).unwrap();
    game.set_pending_guess(point).unwrap();
    game.confirm_guess().unwrap()
}

/// Asserts that a game is in a specific phase
pub fn assert_phase(game: &LocationGame, expected: GamePhase) {
    assert_eq!(
        game.phase(),
        expected,
        "Expected phase {:?}, got {:?}",
        expected,
        game.phase()
    );
}

/// Event collector for testing event emissions
#[derive(Clone)]
pub struct EventCollector {
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_events(&self) -> Vec<GameEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    pub fn last_event(&self) -> Option<GameEvent> {
        self.events.lock().unwrap().last().cloned()
    }

    pub fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn has_event_type(&self, check_fn: impl Fn(&GameEvent) -> bool) -> bool {
        self.events.lock().unwrap().iter().any(check_fn)
    }
}

impl GameEventHandler for EventCollector {
    fn handle_event(&mut self, event: GameEvent) {
        self.events.lock().unwrap().push(event);
    }
}
