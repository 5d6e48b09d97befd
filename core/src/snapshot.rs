use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Read-only view of an engine for the rendering layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub round: RoundId,
    pub cards: Vec<CardView>,
    pub status: EngineStatus,
    pub moves: MoveCount,
    pub elapsed_secs: Seconds,
    pub matched_pairs: PairCount,
    pub total_pairs: PairCount,
    pub columns: u8,
    /// Only present once the round is won.
    pub rating: Option<StarRating>,
}

impl Snapshot {
    pub fn from_engine(engine: &MatchEngine) -> Self {
        let status = engine.status();
        Self {
            round: engine.round(),
            cards: engine.cards().iter().map(Card::view).collect(),
            status,
            moves: engine.moves(),
            elapsed_secs: engine.elapsed_secs(),
            matched_pairs: engine.matched_pairs(),
            total_pairs: engine.total_pairs(),
            columns: engine.config().columns(),
            rating: if status.is_won() {
                engine.star_rating()
            } else {
                None
            },
        }
    }

    /// Cards split into display rows.
    pub fn rows(&self) -> impl Iterator<Item = &[CardView]> {
        self.cards.chunks(usize::from(self.columns.max(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn hidden_cards_do_not_leak_symbols() {
        use Symbol::*;
        let deck = Deck::from_symbols(2, vec![Duck, Koala, Koala, Duck]).unwrap();
        let mut engine = MatchEngine::from_deck(deck, 0);
        engine.select(1);

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.cards[0].face, CardFace::Hidden);
        assert_eq!(snapshot.cards[1].face, CardFace::Shown(Koala));
        assert_eq!(snapshot.rating, None);

        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("koala"));
        assert!(!json.contains("duck"));
    }

    #[test]
    fn rows_follow_column_count() {
        let engine = MatchEngine::new(Difficulty::Easy, 3);
        let snapshot = engine.snapshot();
        let rows: Vec<_> = snapshot.rows().collect();
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|row| row.len() == 3));
    }

    #[test]
    fn rating_only_after_win() {
        use Symbol::*;
        let deck = Deck::from_symbols(2, vec![Pen, Pen]).unwrap();
        let mut engine = MatchEngine::from_deck(deck, 0);
        engine.select(0);
        let completion = engine.select(1).completion().unwrap();
        assert_eq!(engine.snapshot().rating, None);

        engine.complete(completion);
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.status, EngineStatus::Won);
        assert_eq!(snapshot.rating, Some(StarRating::Three));
    }
}
