use game_types::{Guess, Point};

/// Number of guesses shown on the results podium
pub const PODIUM_SIZE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Gold,
    Silver,
    Bronze,
}

impl Placement {
    /// Medal for a zero-based podium index
    pub fn for_rank(rank: usize) -> Option<Self> {
        match rank {
            0 => Some(Placement::Gold),
            1 => Some(Placement::Silver),
            2 => Some(Placement::Bronze),
            _ => None,
        }
    }

    pub fn medal(&self) -> &'static str {
        match self {
            Placement::Gold => "🥇",
            Placement::Silver => "🥈",
            Placement::Bronze => "🥉",
        }
    }
}

pub struct ScoringEngine;

impl ScoringEngine {
    /// Euclidean distance in percentage space. Only physically meaningful
    /// for square images; kept that way so scores match what players see.
    pub fn distance(a: &Point, b: &Point) -> f64 {
        let x_diff = a.x - b.x;
        let y_diff = a.y - b.y;
        (x_diff * x_diff + y_diff * y_diff).sqrt()
    }

    /// All guesses ordered closest first. Ties keep confirmation order.
    pub fn standings(guesses: &[Guess]) -> Vec<Guess> {
        let mut ordered = guesses.to_vec();
        // sort_by is stable
        ordered.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        ordered
    }

    /// The closest guesses, at most [`PODIUM_SIZE`] of them
    pub fn rank_guesses(guesses: &[Guess]) -> Vec<Guess> {
        let mut ranked = Self::standings(guesses);
        ranked.truncate(PODIUM_SIZE);
        ranked
    }

    /// Distance as shown to players ("12 units away")
    pub fn display_distance(distance: f64) -> i64 {
        distance.round() as i64
    }
}
