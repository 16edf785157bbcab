use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::player::{Player, PlayerColor, PlayerId};

/// Lower bound of either coordinate of a [`Point`].
pub const COORDINATE_MIN: f64 = 0.0;
/// Upper bound of either coordinate of a [`Point`].
pub const COORDINATE_MAX: f64 = 100.0;

/// A position on the uploaded image, expressed as a percentage of the
/// rendered width (`x`) and height (`y`). Resolution independent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both coordinates are finite and inside `[0, 100]`
    pub fn is_within_bounds(&self) -> bool {
        let in_range = |v: f64| v.is_finite() && (COORDINATE_MIN..=COORDINATE_MAX).contains(&v);
        in_range(self.x) && in_range(self.y)
    }

    /// Pull both coordinates into `[0, 100]`. NaN collapses to the lower bound.
    pub fn clamped(self) -> Self {
        let clamp = |v: f64| {
            if v.is_nan() {
                COORDINATE_MIN
            } else {
                v.clamp(COORDINATE_MIN, COORDINATE_MAX)
            }
        };
        Self {
            x: clamp(self.x),
            y: clamp(self.y),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GamePhase {
    Setup,   // Collecting players, image, question and target
    Playing, // Players take turns placing guesses
    Results, // Guesses revealed and ranked
}

/// A confirmed guess. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Guess {
    pub point: Point,
    pub distance: f64, // Computed against the target at confirmation time
    pub player_id: PlayerId,
    pub player_name: String,
    pub color: PlayerColor,
}

/// Displayable handle for the uploaded image (a `data:` URL).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ImageRef(pub String);

impl ImageRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Read-only snapshot of a game, handed to the presentation layer for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GameState {
    pub phase: GamePhase,
    pub target_point: Option<Point>,
    pub players: Vec<Player>,   // Insertion order is turn and display order
    pub guesses: Vec<Guess>,    // Confirmation order
    pub image: Option<ImageRef>,
    pub question: String,
    pub current_player: Option<PlayerId>,
    pub pending_guess: Option<Point>,
}

impl GameState {
    /// Players that have not confirmed a guess yet, in insertion order
    pub fn remaining_players(&self) -> Vec<&Player> {
        self.players
            .iter()
            .filter(|player| !self.guesses.iter().any(|g| g.player_id == player.id))
            .collect()
    }

    pub fn current_player(&self) -> Option<&Player> {
        let id = self.current_player?;
        self.players.iter().find(|p| p.id == id)
    }
}
