use game_core::{BoundingBox, GameEvent, GameEventHandler, LocationGame, normalize};
use game_types::{GameError, GameIntent};
use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;
use tracing::{debug, info, warn};

use crate::commands::{Command, HELP};
use crate::config::Config;
use crate::render::render;
use crate::upload::UploadOutcome;

/// What the loop should do after a command
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Print(String),
    StartUpload(PathBuf),
    Quit,
}

/// Subscribed to the game's event bus; marks the view stale on every change.
#[derive(Debug, Clone, Default)]
struct RedrawFlag {
    stale: Rc<Cell<bool>>,
}

impl RedrawFlag {
    fn take(&self) -> bool {
        self.stale.replace(false)
    }
}

impl GameEventHandler for RedrawFlag {
    fn handle_event(&mut self, event: GameEvent) {
        debug!(?event, "game event");
        self.stale.set(true);
    }
}

/// The presentation layer: owns the game, turns commands into intents and
/// re-renders whenever the game reports a change.
#[derive(Debug)]
pub struct Session {
    game: LocationGame,
    viewport: BoundingBox,
    redraw: RedrawFlag,
}

impl Session {
    pub fn new(config: &Config) -> Self {
        let redraw = RedrawFlag::default();
        let mut game = LocationGame::new(config.rules());
        game.add_handler(Box::new(redraw.clone()));

        Self {
            game,
            viewport: config.viewport(),
            redraw,
        }
    }

    pub fn game(&self) -> &LocationGame {
        &self.game
    }

    pub fn execute(&mut self, command: Command) -> Reply {
        let intent = match command {
            Command::Help => return Reply::Print(HELP.to_string()),
            Command::Quit => return Reply::Quit,
            Command::Upload(path) => return Reply::StartUpload(path),
            Command::State => return Reply::Print(self.state_json()),
            Command::Click { x, y } => match normalize(x, y, &self.viewport) {
                Some(point) => GameIntent::PlaceMarker { point },
                None => return Reply::Print("Viewport has no area; check VIEWPORT_WIDTH/HEIGHT".to_string()),
            },
            Command::Target(point) => GameIntent::SetTargetPoint { point },
            Command::Add(name) => GameIntent::AddPlayer { name },
            Command::Remove(player_id) => GameIntent::RemovePlayer { player_id },
            Command::Question(question) => GameIntent::SetQuestion { question },
            Command::Start => GameIntent::StartGame,
            Command::Turn(player_id) => GameIntent::SelectCurrentPlayer { player_id },
            Command::Guess(point) => GameIntent::SetPendingGuess { point },
            Command::Confirm => GameIntent::ConfirmGuess,
            Command::Reveal => GameIntent::RevealResults,
            Command::Reset => GameIntent::ResetGame,
        };

        Reply::Print(self.apply(intent))
    }

    fn apply(&mut self, intent: GameIntent) -> String {
        match self.game.dispatch(intent) {
            Ok(()) if self.redraw.take() => render(&self.game),
            Ok(()) => "Nothing changed".to_string(),
            Err(err) => Self::describe_rejection(&err),
        }
    }

    fn describe_rejection(err: &GameError) -> String {
        format!("Not now: {}", err)
    }

    /// Apply a finished file read. A failed read leaves the game untouched.
    pub fn finish_upload(&mut self, outcome: UploadOutcome) -> String {
        match outcome.result {
            Ok(file) => {
                info!("Loaded image {}", outcome.path.display());
                self.apply(GameIntent::UploadImage {
                    image: Some(file.to_data_url()),
                })
            }
            Err(err) => {
                warn!("Image upload failed: {:#}", err);
                format!("Could not load {}: {:#}", outcome.path.display(), err)
            }
        }
    }

    fn state_json(&self) -> String {
        serde_json::to_string_pretty(&self.game.snapshot())
            .unwrap_or_else(|e| format!("Failed to serialize state: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::parse;
    use game_core::ImageFile;
    use game_types::{GamePhase, Point};

    fn run(session: &mut Session, line: &str) -> Reply {
        let command = parse(line).unwrap().unwrap();
        session.execute(command)
    }

    fn upload(session: &mut Session) -> String {
        session.finish_upload(UploadOutcome {
            path: PathBuf::from("map.png"),
            result: Ok(ImageFile::new(vec![1, 2, 3], Some("image/png".to_string()))),
        })
    }

    #[test]
    fn test_upload_command_defers_to_loop() {
        let mut session = Session::new(&Config::default());
        assert_eq!(
            run(&mut session, "upload map.png"),
            Reply::StartUpload(PathBuf::from("map.png"))
        );
        assert!(session.game().image().is_none());

        let view = upload(&mut session);
        assert!(view.contains("Click on the image"));
        assert!(session.game().image().is_some());
    }

    #[test]
    fn test_failed_upload_leaves_game_unchanged() {
        let mut session = Session::new(&Config::default());
        let message = session.finish_upload(UploadOutcome {
            path: PathBuf::from("broken.png"),
            result: Err(anyhow::anyhow!("disk on fire")),
        });

        assert!(message.contains("Could not load broken.png"));
        assert!(session.game().image().is_none());
    }

    #[test]
    fn test_click_is_normalized_against_viewport() {
        let mut session = Session::new(&Config::default());
        upload(&mut session);

        run(&mut session, "click 400 150");
        assert_eq!(session.game().target_point(), Some(Point::new(50.0, 25.0)));
    }

    #[test]
    fn test_rejections_are_reported() {
        let mut session = Session::new(&Config::default());
        let reply = run(&mut session, "start");
        assert_eq!(
            reply,
            Reply::Print("Not now: need at least 2 players, have 0".to_string())
        );
    }

    #[test]
    fn test_view_is_redrawn_only_after_game_events() {
        let mut session = Session::new(&Config::default());
        upload(&mut session);
        assert!(!session.redraw.stale.get());

        match run(&mut session, "add Alice") {
            Reply::Print(view) => assert!(view.contains("[1] Alice (#f00606)")),
            other => panic!("unexpected reply {:?}", other),
        }

        // Accepted, but nobody has id 7 so nothing is published
        assert_eq!(
            run(&mut session, "remove 7"),
            Reply::Print("Nothing changed".to_string())
        );

        assert_eq!(
            run(&mut session, "confirm"),
            Reply::Print("Not now: operation not allowed during Setup phase".to_string())
        );
        assert!(!session.redraw.stale.get());
    }

    #[test]
    fn test_redraw_flag_tracks_events() {
        let mut flag = RedrawFlag::default();
        assert!(!flag.take());

        flag.handle_event(GameEvent::GameReset);
        assert!(flag.take());
        assert!(!flag.take());
    }

    #[test]
    fn test_full_game_through_commands() {
        let mut session = Session::new(&Config::default());
        upload(&mut session);
        for line in ["target 50 50", "question Where is the fountain?", "add Alice", "add Bob", "start"] {
            run(&mut session, line);
        }
        assert_eq!(session.game().phase(), GamePhase::Playing);

        for line in ["turn 1", "guess 50 50", "confirm", "turn 2", "guess 60 50", "confirm"] {
            run(&mut session, line);
        }

        match run(&mut session, "reveal") {
            Reply::Print(view) => {
                assert!(view.contains("🥇 Alice - 0 units away"));
                assert!(view.contains("🥈 Bob - 10 units away"));
            }
            other => panic!("unexpected reply {:?}", other),
        }

        match run(&mut session, "state") {
            Reply::Print(json) => {
                let value: serde_json::Value = serde_json::from_str(&json).unwrap();
                assert_eq!(value["phase"], "Results");
                assert_eq!(value["guesses"].as_array().unwrap().len(), 2);
            }
            other => panic!("unexpected reply {:?}", other),
        }

        run(&mut session, "reset");
        assert_eq!(session.game().phase(), GamePhase::Setup);
        assert_eq!(run(&mut session, "quit"), Reply::Quit);
    }
}
