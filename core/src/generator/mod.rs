use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

pub trait DeckGenerator {
    fn generate(self, config: DeckConfig) -> Deck;
}

/// Which symbols of the alphabet end up in a deck.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymbolPolicy {
    /// The first `N` symbols of the alphabet.
    Leading,
    /// `N` distinct symbols drawn uniformly.
    Random,
}

impl Default for SymbolPolicy {
    fn default() -> Self {
        Self::Random
    }
}

/// Uniform in-place Fisher-Yates shuffle.
pub fn shuffle<T>(items: &mut [T], rng: &mut SmallRng) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Seeded form of [`shuffle`], the same seed always yields the same order.
pub fn shuffle_seeded<T>(items: &mut [T], seed: u64) {
    let mut rng = SmallRng::seed_from_u64(seed);
    shuffle(items, &mut rng);
}
