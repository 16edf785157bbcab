use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{ImageRef, PlayerId, Point};

/// Requests the presentation layer sends to the game controller.
/// Each intent maps onto exactly one state machine operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GameIntent {
    UploadImage { image: Option<ImageRef> },
    SetTargetPoint { point: Point },
    AddPlayer { name: String },
    RemovePlayer { player_id: PlayerId },
    SetQuestion { question: String },
    StartGame,
    SelectCurrentPlayer { player_id: PlayerId },
    SetPendingGuess { point: Point },
    /// A click on the image, routed by phase
    PlaceMarker { point: Point },
    ConfirmGuess,
    RevealResults,
    ResetGame,
}
