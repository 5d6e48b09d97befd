#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::ops::Index;
use serde::{Deserialize, Serialize};

pub use card::*;
pub use difficulty::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use rating::*;
pub use session::*;
pub use snapshot::*;
pub use timeline::*;
pub use types::*;

mod card;
mod difficulty;
mod engine;
mod error;
mod generator;
mod rating;
mod session;
mod snapshot;
mod timeline;
mod types;

/// Dealt order of symbols, position `i` holds the symbol of card `i`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    config: DeckConfig,
    symbols: Vec<Symbol>,
}

impl Deck {
    pub(crate) fn new_unchecked(config: DeckConfig, symbols: Vec<Symbol>) -> Self {
        Self { config, symbols }
    }

    /// Builds a deck from a fixed layout, every symbol must appear exactly twice.
    pub fn from_symbols(columns: u8, symbols: Vec<Symbol>) -> Result<Self> {
        if symbols.len() > Symbol::ALL.len() * 2 {
            return Err(GameError::InvalidDeck);
        }
        let mut counts: hashbrown::HashMap<Symbol, usize> = hashbrown::HashMap::new();
        for &symbol in &symbols {
            *counts.entry(symbol).or_insert(0) += 1;
        }
        if counts.values().any(|&count| count != 2) {
            return Err(GameError::InvalidDeck);
        }

        let pairs = PairCount::try_from(counts.len()).map_err(|_| GameError::InvalidDeck)?;
        let config = DeckConfig::new(pairs, columns)?;
        Ok(Self::new_unchecked(config, symbols))
    }

    pub fn config(&self) -> DeckConfig {
        self.config
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn symbol_at(&self, id: CardId) -> Option<Symbol> {
        self.symbols.get(usize::from(id)).copied()
    }

    /// Face-down cards in dealt order.
    pub fn deal(&self) -> Vec<Card> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(i, &symbol)| Card::new(i as CardId, symbol))
            .collect()
    }
}

impl Index<CardId> for Deck {
    type Output = Symbol;

    fn index(&self, id: CardId) -> &Self::Output {
        &self.symbols[usize::from(id)]
    }
}
