use serde::{Deserialize, Serialize};

/// Position of a card within the dealt deck, `0..2N`.
pub type CardId = u8;

/// Count type used for pair totals and matched pairs.
pub type PairCount = u8;

/// Number of pair-flip attempts in a round.
pub type MoveCount = u32;

/// Whole seconds on the round timer.
pub type Seconds = u32;

/// Milliseconds, used for completion delays and the virtual clock.
pub type Millis = u64;

/// Generation number of a dealt round, bumped on every deal.
///
/// Anything scheduled against a round carries its id, so work issued for a
/// superseded round can be recognized and dropped.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct RoundId(u32);

impl RoundId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Derives the seed of the following round from the current one.
pub const fn next_seed(seed: u64) -> u64 {
    // splitmix64 step
    let mut z = seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
