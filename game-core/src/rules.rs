/// Smallest game that makes sense: one player can't rank against anyone.
pub const MIN_PLAYERS: usize = 2;

/// Built through [`GameRules::new`] so the player floor always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRules {
    min_players: usize,
    require_question: bool,
}

impl GameRules {
    pub fn new(min_players: usize, require_question: bool) -> Self {
        Self {
            min_players: min_players.max(MIN_PLAYERS),
            require_question,
        }
    }

    pub fn min_players(&self) -> usize {
        self.min_players
    }

    pub fn require_question(&self) -> bool {
        self.require_question
    }
}

impl Default for GameRules {
    fn default() -> Self {
        Self::new(MIN_PLAYERS, true)
    }
}
