use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StarRating {
    One,
    Two,
    Three,
}

impl StarRating {
    pub const MAX_STARS: u8 = 3;

    /// Rates a finished round by `pairs / moves`: 3 stars at 0.8 or better, 2 at 0.6, 1 otherwise.
    ///
    /// No rating exists before the first move.
    pub const fn from_moves(pairs: PairCount, moves: MoveCount) -> Option<Self> {
        if moves == 0 {
            return None;
        }
        // integer form of pairs / moves >= 0.8 and >= 0.6
        let pairs = pairs as u64 * 5;
        let moves = moves as u64;
        Some(if pairs >= moves * 4 {
            Self::Three
        } else if pairs >= moves * 3 {
            Self::Two
        } else {
            Self::One
        })
    }

    pub const fn stars(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }
}

pub fn efficiency(pairs: PairCount, moves: MoveCount) -> Option<f32> {
    (moves > 0).then(|| f32::from(pairs) / moves as f32)
}
