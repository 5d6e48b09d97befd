use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

/// Pair count and display grid shape of a deck.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckConfig {
    pairs: PairCount,
    columns: u8,
}

impl DeckConfig {
    pub const fn new_unchecked(pairs: PairCount, columns: u8) -> Self {
        Self { pairs, columns }
    }

    pub fn new(pairs: PairCount, columns: u8) -> Result<Self> {
        let config = Self::new_unchecked(pairs, columns);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.pairs == 0 {
            Err(GameError::ZeroPairs)
        } else if usize::from(self.pairs) > Symbol::ALL.len() {
            Err(GameError::TooManyPairs {
                requested: self.pairs,
                available: Symbol::ALL.len(),
            })
        } else if self.columns == 0 {
            Err(GameError::ZeroColumns)
        } else {
            Ok(())
        }
    }

    pub const fn is_valid(&self) -> bool {
        self.pairs > 0 && (self.pairs as usize) <= Symbol::ALL.len() && self.columns > 0
    }

    pub const fn pairs(&self) -> PairCount {
        self.pairs
    }

    pub const fn columns(&self) -> u8 {
        self.columns
    }

    pub const fn card_count(&self) -> usize {
        self.pairs as usize * 2
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub const fn config(self) -> DeckConfig {
        use Difficulty::*;
        match self {
            Easy => DeckConfig::new_unchecked(6, 3),
            Medium => DeckConfig::new_unchecked(8, 4),
            Hard => DeckConfig::new_unchecked(12, 4),
        }
    }

    pub const fn name(self) -> &'static str {
        use Difficulty::*;
        match self {
            Easy => "Easy",
            Medium => "Medium",
            Hard => "Hard",
        }
    }

    pub const fn key(self) -> &'static str {
        use Difficulty::*;
        match self {
            Easy => "easy",
            Medium => "medium",
            Hard => "hard",
        }
    }
}

// presets must fit the alphabet
const _: () = {
    let mut i = 0;
    while i < Difficulty::ALL.len() {
        assert!(Difficulty::ALL[i].config().is_valid());
        i += 1;
    }
};

impl Default for Difficulty {
    fn default() -> Self {
        Self::Easy
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Difficulty::ALL
            .into_iter()
            .find(|difficulty| difficulty.key().eq_ignore_ascii_case(s))
            .ok_or(GameError::UnknownDifficulty)
    }
}
