use thiserror::Error;

use crate::PairCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("A deck needs at least one pair")]
    ZeroPairs,
    #[error("Too many pairs, requested {requested} but only {available} symbols exist")]
    TooManyPairs {
        requested: PairCount,
        available: usize,
    },
    #[error("Grid needs at least one column")]
    ZeroColumns,
    #[error("Every symbol in a deck must appear exactly twice")]
    InvalidDeck,
    #[error("Unknown difficulty")]
    UnknownDifficulty,
}

pub type Result<T> = core::result::Result<T, GameError>;
