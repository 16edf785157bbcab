use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Player colours, assigned in join order. The palette length caps the
/// number of players in a game.
pub const PALETTE: [&str; 10] = [
    "#f00606", "#14b311", "#1911b3", "#9e1c82", "#c96212",
    "#b59624", "#9B59B6", "#3498DB", "#E67E22", "#45B7D1",
];

/// Identifier handed out by the game controller; strictly increasing in join order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PlayerId(pub u32);

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PlayerColor(pub String);

impl PlayerColor {
    /// Colour for the player joining at `index`, if the palette has one left
    pub fn for_index(index: usize) -> Option<Self> {
        PALETTE.get(index).map(|hex| PlayerColor(hex.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Player {
    pub id: PlayerId,
    pub name: String, // Trimmed, never empty
    pub color: PlayerColor,
}
