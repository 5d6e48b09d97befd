use alloc::collections::BTreeMap;
use serde::{Deserialize, Serialize};

use crate::*;

/// Delay before a matching pair is marked matched.
pub const MATCH_DELAY_MS: Millis = 500;

/// Delay before a mismatched pair is flipped back.
pub const MISMATCH_DELAY_MS: Millis = 1000;

/// Delay between winning a round and dealing the next one.
pub const REDEAL_DELAY_MS: Millis = 1250;

/// Period of the round timer.
pub const TICK_INTERVAL_MS: Millis = 1000;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompletionKind {
    Match,
    Mismatch,
    Redeal,
}

impl CompletionKind {
    pub const fn delay_ms(self) -> Millis {
        match self {
            Self::Match => MATCH_DELAY_MS,
            Self::Mismatch => MISMATCH_DELAY_MS,
            Self::Redeal => REDEAL_DELAY_MS,
        }
    }
}

/// A delayed transition issued by the engine, to be handed back through
/// [`MatchEngine::complete`] once its delay has elapsed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Completion {
    pub round: RoundId,
    pub kind: CompletionKind,
}

impl Completion {
    pub const fn new(round: RoundId, kind: CompletionKind) -> Self {
        Self { round, kind }
    }

    pub const fn delay_ms(&self) -> Millis {
        self.kind.delay_ms()
    }
}

/// Virtual-time queue of pending completions.
///
/// Entries are released in due-time order, ties in scheduling order, and each
/// one is handed out exactly once.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Timeline {
    now: Millis,
    seq: u64,
    queue: BTreeMap<(Millis, u64), Completion>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Queues `completion` after its delay, returns when it falls due.
    pub fn schedule(&mut self, completion: Completion) -> Millis {
        let due = self.now.saturating_add(completion.delay_ms());
        self.queue.insert((due, self.seq), completion);
        self.seq += 1;
        log::trace!("scheduled {:?} at {}", completion, due);
        due
    }

    pub fn next_due(&self) -> Option<Millis> {
        self.queue.keys().next().map(|&(due, _)| due)
    }

    /// Moves the clock forward, never backwards.
    pub fn advance_to(&mut self, at: Millis) {
        self.now = self.now.max(at);
    }

    /// Removes and returns the earliest entry that is due.
    pub fn pop_due(&mut self) -> Option<Completion> {
        let (&key, _) = self.queue.first_key_value()?;
        if key.0 > self.now {
            return None;
        }
        self.queue.remove(&key)
    }

    /// Drops everything not issued for `round`, returns how many were dropped.
    pub fn retain_round(&mut self, round: RoundId) -> usize {
        let before = self.queue.len();
        self.queue.retain(|_, completion| completion.round == round);
        let dropped = before - self.queue.len();
        if dropped > 0 {
            log::debug!("dropped {} completions of superseded rounds", dropped);
        }
        dropped
    }
}
