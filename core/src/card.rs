use alloc::format;
use alloc::string::String;
use serde::{Deserialize, Serialize};

use crate::*;

/// Opaque face identifier. The UI maps each one to an asset by [`Symbol::name`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Symbol {
    Bee,
    Bug,
    Cat,
    Duck,
    Elephant,
    Fox,
    Giraffe,
    Hippo,
    Koala,
    Monkey,
    Pen,
    Rabbit,
    Turtle,
    Sheep,
}

impl Symbol {
    /// The fixed alphabet decks are drawn from.
    pub const ALL: [Symbol; 14] = [
        Symbol::Bee,
        Symbol::Bug,
        Symbol::Cat,
        Symbol::Duck,
        Symbol::Elephant,
        Symbol::Fox,
        Symbol::Giraffe,
        Symbol::Hippo,
        Symbol::Koala,
        Symbol::Monkey,
        Symbol::Pen,
        Symbol::Rabbit,
        Symbol::Turtle,
        Symbol::Sheep,
    ];

    pub const fn name(self) -> &'static str {
        use Symbol::*;
        match self {
            Bee => "bee",
            Bug => "bug",
            Cat => "cat",
            Duck => "duck",
            Elephant => "elephant",
            Fox => "fox",
            Giraffe => "giraffe",
            Hippo => "hippo",
            Koala => "koala",
            Monkey => "monkey",
            Pen => "pen",
            Rabbit => "rabbit",
            Turtle => "turtle",
            Sheep => "sheep",
        }
    }
}

/// Canonical card state stored by the engine.
///
/// A matched card is always revealed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    symbol: Symbol,
    revealed: bool,
    matched: bool,
}

impl Card {
    pub const fn new(id: CardId, symbol: Symbol) -> Self {
        Self {
            id,
            symbol,
            revealed: false,
            matched: false,
        }
    }

    pub const fn id(&self) -> CardId {
        self.id
    }

    pub const fn symbol(&self) -> Symbol {
        self.symbol
    }

    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub const fn is_matched(&self) -> bool {
        self.matched
    }

    /// Face-up and still waiting for its pair to be resolved.
    pub const fn is_pending(&self) -> bool {
        self.revealed && !self.matched
    }

    pub(crate) fn reveal(&mut self) {
        self.revealed = true;
    }

    pub(crate) fn hide(&mut self) {
        self.revealed = false;
    }

    pub(crate) fn mark_matched(&mut self) {
        self.revealed = true;
        self.matched = true;
    }

    pub fn view(&self) -> CardView {
        CardView {
            id: self.id,
            face: if self.revealed {
                CardFace::Shown(self.symbol)
            } else {
                CardFace::Hidden
            },
            revealed: self.revealed,
            matched: self.matched,
        }
    }
}

/// What a player may see of a card.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardFace {
    Hidden,
    Shown(Symbol),
}

impl CardFace {
    pub const fn symbol(self) -> Option<Symbol> {
        match self {
            Self::Hidden => None,
            Self::Shown(symbol) => Some(symbol),
        }
    }
}

impl Default for CardFace {
    fn default() -> Self {
        Self::Hidden
    }
}

/// Player-visible projection of a [`Card`], the symbol is withheld while face down.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub id: CardId,
    pub face: CardFace,
    pub revealed: bool,
    pub matched: bool,
}

impl CardView {
    pub fn label(&self) -> String {
        match self.face {
            CardFace::Shown(symbol) => format!("Card showing {}", symbol.name()),
            CardFace::Hidden => String::from("Hidden card"),
        }
    }
}
