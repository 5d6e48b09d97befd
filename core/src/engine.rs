use alloc::vec::Vec;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineStatus {
    /// Dealt, no card selected yet.
    Idle,
    /// Timer running.
    Active,
    /// Every pair matched, timer frozen until the next deal.
    Won,
}

impl EngineStatus {
    pub const fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }

    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    pub const fn is_won(self) -> bool {
        matches!(self, Self::Won)
    }
}

impl Default for EngineStatus {
    fn default() -> Self {
        Self::Idle
    }
}

/// Why a selection was dropped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// A pair is being evaluated.
    Locked,
    /// No card at that position.
    OutOfRange,
    AlreadyRevealed,
    AlreadyMatched,
    /// The round is over, waiting for the next deal.
    RoundWon,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    Ignored(Rejection),
    /// First card of a pair is face up.
    Revealed,
    /// Second card is face up, input is locked until `completion` is applied.
    Evaluating(Completion),
}

impl SelectOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Ignored(_))
    }

    pub const fn completion(self) -> Option<Completion> {
        match self {
            Self::Evaluating(completion) => Some(completion),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CompleteOutcome {
    /// Issued for another round, or already applied.
    Stale,
    Matched,
    Mismatched,
    /// Last pair matched, `completion` deals the next round.
    Won(Completion),
    Redealt,
}

impl CompleteOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Stale)
    }

    pub const fn completion(self) -> Option<Completion> {
        match self {
            Self::Won(completion) => Some(completion),
            _ => None,
        }
    }
}

/// State of one game session: the dealt deck, the pair being evaluated and the round counters.
///
/// The engine never reads a clock. Delayed transitions are returned as [`Completion`]s and
/// the timer advances through [`MatchEngine::tick`], both tagged with the [`RoundId`] they
/// were issued for so that a new deal invalidates them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchEngine {
    deck: Deck,
    cards: Vec<Card>,
    pending: SmallVec<[CardId; 2]>,
    scheduled: Option<Completion>,
    status: EngineStatus,
    moves: MoveCount,
    elapsed_secs: Seconds,
    matched_pairs: PairCount,
    round: RoundId,
    seed: u64,
    policy: SymbolPolicy,
}

impl MatchEngine {
    pub fn new(difficulty: Difficulty, seed: u64) -> Self {
        Self::with_policy(difficulty.config(), seed, SymbolPolicy::default())
    }

    pub fn with_policy(config: DeckConfig, seed: u64, policy: SymbolPolicy) -> Self {
        let deck = RandomDeckGenerator::new(seed, policy).generate(config);
        Self::from_parts(deck, seed, policy, RoundId::default())
    }

    /// Starts from a fixed layout, later rounds are generated randomly from `seed`.
    pub fn from_deck(deck: Deck, seed: u64) -> Self {
        Self::from_parts(deck, seed, SymbolPolicy::default(), RoundId::default())
    }

    fn from_parts(deck: Deck, seed: u64, policy: SymbolPolicy, round: RoundId) -> Self {
        let cards = deck.deal();
        Self {
            deck,
            cards,
            pending: SmallVec::new(),
            scheduled: None,
            status: EngineStatus::Idle,
            moves: 0,
            elapsed_secs: 0,
            matched_pairs: 0,
            round,
            seed,
            policy,
        }
    }

    pub fn status(&self) -> EngineStatus {
        self.status
    }

    pub fn config(&self) -> DeckConfig {
        self.deck.config()
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn round(&self) -> RoundId {
        self.round
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn moves(&self) -> MoveCount {
        self.moves
    }

    pub fn elapsed_secs(&self) -> Seconds {
        self.elapsed_secs
    }

    pub fn matched_pairs(&self) -> PairCount {
        self.matched_pairs
    }

    pub fn total_pairs(&self) -> PairCount {
        self.deck.config().pairs()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(usize::from(id))
    }

    pub fn pending(&self) -> &[CardId] {
        &self.pending
    }

    /// Whether a pair is being evaluated and selections are dropped.
    pub fn is_locked(&self) -> bool {
        matches!(
            self.scheduled,
            Some(Completion {
                kind: CompletionKind::Match | CompletionKind::Mismatch,
                ..
            })
        )
    }

    /// The completion the engine is waiting for, if any.
    pub fn scheduled(&self) -> Option<Completion> {
        self.scheduled
    }

    pub fn star_rating(&self) -> Option<StarRating> {
        StarRating::from_moves(self.total_pairs(), self.moves)
    }

    /// Deals a fresh round with the current configuration.
    pub fn reset(&mut self, seed: u64) {
        self.deal(self.config(), seed);
    }

    /// Deals a fresh round at `difficulty`.
    pub fn set_difficulty(&mut self, difficulty: Difficulty, seed: u64) {
        self.deal(difficulty.config(), seed);
    }

    /// Replaces the current round with a fixed layout.
    pub fn load_deck(&mut self, deck: Deck) {
        self.install(deck, self.seed);
    }

    fn deal(&mut self, config: DeckConfig, seed: u64) {
        let deck = RandomDeckGenerator::new(seed, self.policy).generate(config);
        self.install(deck, seed);
    }

    fn install(&mut self, deck: Deck, seed: u64) {
        let round = self.round.next();
        log::debug!(
            "dealing round {} with {} pairs",
            round.get(),
            deck.config().pairs()
        );
        if let Some(stale) = self.scheduled {
            log::debug!("discarding {:?} of round {}", stale.kind, stale.round.get());
        }
        *self = Self::from_parts(deck, seed, self.policy, round);
    }

    pub fn select(&mut self, id: CardId) -> SelectOutcome {
        use Rejection::*;

        if self.status.is_idle() {
            log::debug!("round {} started", self.round.get());
            self.status = EngineStatus::Active;
        }

        if let Err(rejection) = self.check_selectable(id) {
            log::trace!("selection of {} ignored: {:?}", id, rejection);
            return SelectOutcome::Ignored(rejection);
        }

        let Some(card) = self.cards.get_mut(usize::from(id)) else {
            return SelectOutcome::Ignored(OutOfRange);
        };
        card.reveal();
        self.pending.push(id);

        let [first, second] = self.pending[..] else {
            return SelectOutcome::Revealed;
        };

        self.moves = self.moves.saturating_add(1);
        let [a, b] = [first, second].map(|id| self.cards[usize::from(id)].symbol());
        let kind = if a == b {
            CompletionKind::Match
        } else {
            CompletionKind::Mismatch
        };
        log::debug!("move {}: {} and {} -> {:?}", self.moves, first, second, kind);

        let completion = Completion::new(self.round, kind);
        self.scheduled = Some(completion);
        SelectOutcome::Evaluating(completion)
    }

    fn check_selectable(&self, id: CardId) -> core::result::Result<(), Rejection> {
        use Rejection::*;

        if self.is_locked() || self.pending.len() >= 2 {
            return Err(Locked);
        }
        if self.status.is_won() {
            return Err(RoundWon);
        }
        let card = self.card(id).ok_or(OutOfRange)?;
        if card.is_matched() {
            Err(AlreadyMatched)
        } else if card.is_revealed() {
            Err(AlreadyRevealed)
        } else {
            Ok(())
        }
    }

    /// Applies a completion previously returned by [`MatchEngine::select`] or by a win.
    pub fn complete(&mut self, completion: Completion) -> CompleteOutcome {
        if completion.round != self.round {
            log::debug!(
                "stale {:?} for round {}, current is {}",
                completion.kind,
                completion.round.get(),
                self.round.get()
            );
            return CompleteOutcome::Stale;
        }
        if self.scheduled != Some(completion) {
            log::debug!("{:?} not awaited, ignoring", completion.kind);
            return CompleteOutcome::Stale;
        }
        self.scheduled = None;

        match completion.kind {
            CompletionKind::Match => self.resolve_match(),
            CompletionKind::Mismatch => self.resolve_mismatch(),
            CompletionKind::Redeal => {
                let seed = next_seed(self.seed);
                self.reset(seed);
                CompleteOutcome::Redealt
            }
        }
    }

    fn resolve_match(&mut self) -> CompleteOutcome {
        for id in self.pending.drain(..) {
            if let Some(card) = self.cards.get_mut(usize::from(id)) {
                card.mark_matched();
            }
        }
        self.matched_pairs = self.matched_pairs.saturating_add(1);

        let total = self.total_pairs();
        if total > 0 && self.matched_pairs == total {
            self.status = EngineStatus::Won;
            log::debug!(
                "round {} won in {} moves, {}s",
                self.round.get(),
                self.moves,
                self.elapsed_secs
            );
            let redeal = Completion::new(self.round, CompletionKind::Redeal);
            self.scheduled = Some(redeal);
            CompleteOutcome::Won(redeal)
        } else {
            CompleteOutcome::Matched
        }
    }

    fn resolve_mismatch(&mut self) -> CompleteOutcome {
        for id in self.pending.drain(..) {
            if let Some(card) = self.cards.get_mut(usize::from(id)) {
                card.hide();
            }
        }
        CompleteOutcome::Mismatched
    }

    /// Advances the round timer by one second, only while the round is active.
    pub fn tick(&mut self, round: RoundId) -> bool {
        if round != self.round || !self.status.is_active() {
            return false;
        }
        self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        true
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_engine(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    // Cat Fox Cat Fox Bee Bee
    fn engine() -> MatchEngine {
        use Symbol::*;
        let deck = Deck::from_symbols(3, vec![Cat, Fox, Cat, Fox, Bee, Bee]).unwrap();
        MatchEngine::from_deck(deck, 1)
    }

    fn play_pair(engine: &mut MatchEngine, a: CardId, b: CardId) -> CompleteOutcome {
        assert_eq!(engine.select(a), SelectOutcome::Revealed);
        let completion = engine.select(b).completion().unwrap();
        engine.complete(completion)
    }

    #[test]
    fn new_round_is_idle_and_face_down() {
        let engine = MatchEngine::new(Difficulty::Medium, 5);
        assert_eq!(engine.status(), EngineStatus::Idle);
        assert_eq!(engine.cards().len(), 16);
        assert_eq!(engine.moves(), 0);
        assert_eq!(engine.elapsed_secs(), 0);
        assert_eq!(engine.matched_pairs(), 0);
        assert!(engine.cards().iter().all(|c| !c.is_revealed() && !c.is_matched()));
    }

    #[test]
    fn first_selection_starts_round() {
        let mut engine = engine();
        assert_eq!(engine.select(0), SelectOutcome::Revealed);
        assert_eq!(engine.status(), EngineStatus::Active);
        assert!(engine.card(0).unwrap().is_revealed());
        assert_eq!(engine.pending(), &[0]);
    }

    #[test]
    fn matching_pair_resolves_after_completion() {
        let mut engine = engine();
        engine.select(0);
        let outcome = engine.select(2);
        let completion = outcome.completion().unwrap();

        assert_eq!(completion.kind, CompletionKind::Match);
        assert_eq!(completion.delay_ms(), MATCH_DELAY_MS);
        assert_eq!(engine.moves(), 1);
        assert!(engine.is_locked());
        assert!(!engine.card(0).unwrap().is_matched());

        assert_eq!(engine.complete(completion), CompleteOutcome::Matched);
        assert!(engine.card(0).unwrap().is_matched());
        assert!(engine.card(2).unwrap().is_matched());
        assert_eq!(engine.matched_pairs(), 1);
        assert!(engine.pending().is_empty());
        assert!(!engine.is_locked());
    }

    #[test]
    fn mismatched_pair_flips_back() {
        let mut engine = engine();
        engine.select(0);
        let completion = engine.select(1).completion().unwrap();

        assert_eq!(completion.kind, CompletionKind::Mismatch);
        assert_eq!(completion.delay_ms(), MISMATCH_DELAY_MS);
        assert_eq!(engine.moves(), 1);

        assert_eq!(engine.complete(completion), CompleteOutcome::Mismatched);
        assert!(!engine.card(0).unwrap().is_revealed());
        assert!(!engine.card(1).unwrap().is_revealed());
        assert_eq!(engine.matched_pairs(), 0);
        assert_eq!(engine.moves(), 1);
    }

    #[test]
    fn third_selection_is_dropped_while_locked() {
        let mut engine = engine();
        engine.select(0);
        engine.select(1);
        let before = engine.snapshot();

        assert_eq!(engine.select(4), SelectOutcome::Ignored(Rejection::Locked));
        assert_eq!(engine.snapshot(), before);
        assert!(!engine.card(4).unwrap().is_revealed());
    }

    #[test]
    fn reselecting_revealed_or_matched_card_is_noop() {
        let mut engine = engine();
        engine.select(0);
        let before = engine.snapshot();
        assert_eq!(
            engine.select(0),
            SelectOutcome::Ignored(Rejection::AlreadyRevealed)
        );
        assert_eq!(engine.snapshot(), before);

        let completion = engine.select(2).completion().unwrap();
        engine.complete(completion);
        let before = engine.snapshot();
        assert_eq!(
            engine.select(2),
            SelectOutcome::Ignored(Rejection::AlreadyMatched)
        );
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn out_of_range_selection_is_ignored() {
        let mut engine = engine();
        engine.select(0);
        let before = engine.snapshot();
        assert_eq!(engine.select(6), SelectOutcome::Ignored(Rejection::OutOfRange));
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn completion_applies_exactly_once() {
        let mut engine = engine();
        engine.select(0);
        let completion = engine.select(2).completion().unwrap();
        assert_eq!(engine.complete(completion), CompleteOutcome::Matched);
        assert_eq!(engine.complete(completion), CompleteOutcome::Stale);
        assert_eq!(engine.matched_pairs(), 1);
    }

    #[test]
    fn reset_invalidates_pending_completion() {
        let mut engine = engine();
        engine.select(0);
        let completion = engine.select(2).completion().unwrap();
        let old_round = engine.round();

        engine.set_difficulty(Difficulty::Hard, 9);
        assert_ne!(engine.round(), old_round);
        assert_eq!(engine.cards().len(), 24);
        assert!(!engine.is_locked());

        let before = engine.snapshot();
        assert_eq!(engine.complete(completion), CompleteOutcome::Stale);
        assert_eq!(engine.snapshot(), before);
        assert_eq!(engine.matched_pairs(), 0);
    }

    #[test]
    fn winning_freezes_timer_and_redeals() {
        let mut engine = engine();
        engine.select(0);
        engine.tick(engine.round());
        engine.tick(engine.round());

        let completion = engine.select(2).completion().unwrap();
        engine.complete(completion);
        assert_eq!(play_pair(&mut engine, 1, 3), CompleteOutcome::Matched);
        let outcome = play_pair(&mut engine, 4, 5);

        let redeal = outcome.completion().unwrap();
        assert_eq!(redeal.kind, CompletionKind::Redeal);
        assert_eq!(redeal.delay_ms(), REDEAL_DELAY_MS);
        assert_eq!(engine.status(), EngineStatus::Won);
        assert_eq!(engine.matched_pairs(), 3);
        assert_eq!(engine.moves(), 3);
        assert_eq!(engine.star_rating(), Some(StarRating::Three));

        assert!(!engine.tick(engine.round()));
        assert_eq!(engine.elapsed_secs(), 2);
        assert_eq!(engine.select(0), SelectOutcome::Ignored(Rejection::RoundWon));

        let won_round = engine.round();
        let won_deck = engine.deck().clone();
        assert_eq!(engine.complete(redeal), CompleteOutcome::Redealt);
        assert_ne!(engine.round(), won_round);
        assert_eq!(engine.seed(), next_seed(1));
        assert_ne!(engine.deck(), &won_deck);
        let expected = RandomDeckGenerator::new(next_seed(1), SymbolPolicy::default())
            .generate(won_deck.config());
        assert_eq!(engine.deck(), &expected);
        assert_eq!(engine.status(), EngineStatus::Idle);
        assert_eq!(engine.config().pairs(), 3);
        assert_eq!(engine.cards().len(), 6);
        assert_eq!(engine.moves(), 0);
        assert_eq!(engine.elapsed_secs(), 0);
        assert_eq!(engine.matched_pairs(), 0);
        assert!(engine.cards().iter().all(|c| !c.is_revealed()));
    }

    #[test]
    fn load_deck_replaces_round_and_keeps_seed() {
        use Symbol::*;
        let mut engine = MatchEngine::new(Difficulty::Easy, 9);
        engine.select(0);
        let completion = engine.select(1).completion().unwrap();
        let old_round = engine.round();

        let deck = Deck::from_symbols(2, vec![Hippo, Hippo, Sheep, Sheep]).unwrap();
        engine.load_deck(deck.clone());

        assert_ne!(engine.round(), old_round);
        assert_eq!(engine.seed(), 9);
        assert_eq!(engine.deck(), &deck);
        assert_eq!(engine.status(), EngineStatus::Idle);
        assert_eq!(engine.moves(), 0);
        assert_eq!(engine.scheduled(), None);
        assert_eq!(engine.complete(completion), CompleteOutcome::Stale);
        assert_eq!(play_pair(&mut engine, 0, 1), CompleteOutcome::Matched);
    }

    #[test]
    fn tick_only_counts_active_current_round() {
        let mut engine = engine();
        assert!(!engine.tick(engine.round()));
        engine.select(0);
        assert!(engine.tick(engine.round()));
        assert!(!engine.tick(RoundId::new(99)));
        assert_eq!(engine.elapsed_secs(), 1);
    }

    #[test]
    fn at_most_two_unmatched_cards_face_up() {
        let mut engine = MatchEngine::new(Difficulty::Hard, 77);
        for id in 0..24 {
            engine.select(id);
            let face_up = engine.cards().iter().filter(|c| c.is_pending()).count();
            assert!(face_up <= 2);
        }
    }
}
