use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{GamePhase, PlayerId};

/// Reason an operation was refused. A refused operation never changes game state.
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GameError {
    #[error("operation not allowed during {current:?} phase")]
    WrongPhase { current: GamePhase },
    #[error("player name must not be empty")]
    EmptyPlayerName,
    #[error("no colours left for another player (limit {limit})")]
    PaletteExhausted { limit: u32 },
    #[error("player {player_id} not found")]
    PlayerNotFound { player_id: PlayerId },
    #[error("player {player_id} has already guessed")]
    AlreadyGuessed { player_id: PlayerId },
    #[error("need at least {required} players, have {actual}")]
    NotEnoughPlayers { required: u32, actual: u32 },
    #[error("no image uploaded")]
    ImageMissing,
    #[error("no target point set")]
    TargetMissing,
    #[error("question must not be empty")]
    QuestionMissing,
    #[error("another player's turn is in progress")]
    TurnInProgress,
    #[error("no player is currently guessing")]
    NoActivePlayer,
    #[error("no pending guess to confirm")]
    NoPendingGuess,
    #[error("{remaining} player(s) still have to guess")]
    GuessesOutstanding { remaining: u32 },
    #[error("point ({x}, {y}) is outside the image")]
    PointOutOfBounds { x: f64, y: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GameError::NotEnoughPlayers { required: 2, actual: 1 };
        assert_eq!(err.to_string(), "need at least 2 players, have 1");

        let err = GameError::WrongPhase { current: GamePhase::Results };
        assert_eq!(err.to_string(), "operation not allowed during Results phase");

        let err = GameError::AlreadyGuessed { player_id: PlayerId(3) };
        assert_eq!(err.to_string(), "player 3 has already guessed");
    }
}
