use alloc::vec::Vec;
use rand::prelude::*;
use rand::seq::SliceRandom;

use super::*;

/// Generation strategy that picks symbols by [`SymbolPolicy`] and deals them in uniformly random order.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomDeckGenerator {
    seed: u64,
    policy: SymbolPolicy,
}

impl RandomDeckGenerator {
    pub fn new(seed: u64, policy: SymbolPolicy) -> Self {
        Self { seed, policy }
    }
}

impl DeckGenerator for RandomDeckGenerator {
    fn generate(self, config: DeckConfig) -> Deck {
        let available = Symbol::ALL.len();
        let pairs = usize::from(config.pairs());
        let config = if pairs > available {
            log::warn!(
                "Not enough symbols, requested {} pairs but only {} exist",
                pairs,
                available
            );
            DeckConfig::new_unchecked(available as PairCount, config.columns())
        } else {
            config
        };
        let pairs = usize::from(config.pairs());

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut alphabet = Symbol::ALL;
        let chosen: &[Symbol] = match self.policy {
            SymbolPolicy::Leading => &alphabet[..pairs],
            SymbolPolicy::Random => alphabet.partial_shuffle(&mut rng, pairs).0,
        };

        let mut symbols = Vec::with_capacity(config.card_count());
        symbols.extend(chosen.iter().flat_map(|&symbol| [symbol, symbol]));
        shuffle(&mut symbols, &mut rng);

        log::trace!("dealt {:?} with seed {}", symbols, self.seed);
        Deck::new_unchecked(config, symbols)
    }
}
