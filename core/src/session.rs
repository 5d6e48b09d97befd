use crate::*;

/// Headless driver pairing a [`MatchEngine`] with a virtual [`Timeline`].
///
/// Plays the role the UI plays with real timers: schedules every completion the
/// engine hands out, runs the one-second timer while the round is active and
/// purges queued work whenever a new round is dealt.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    engine: MatchEngine,
    timeline: Timeline,
    next_tick: Option<Millis>,
}

impl Session {
    pub fn new(engine: MatchEngine) -> Self {
        Self {
            engine,
            timeline: Timeline::new(),
            next_tick: None,
        }
    }

    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn now(&self) -> Millis {
        self.timeline.now()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.engine.snapshot()
    }

    pub fn select(&mut self, id: CardId) -> SelectOutcome {
        let was_idle = self.engine.status().is_idle();
        let outcome = self.engine.select(id);
        if was_idle && self.engine.status().is_active() {
            self.next_tick = Some(self.now().saturating_add(TICK_INTERVAL_MS));
        }
        if let Some(completion) = outcome.completion() {
            self.timeline.schedule(completion);
        }
        outcome
    }

    pub fn reset(&mut self, seed: u64) {
        self.engine.reset(seed);
        self.on_deal();
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty, seed: u64) {
        self.engine.set_difficulty(difficulty, seed);
        self.on_deal();
    }

    fn on_deal(&mut self) {
        self.timeline.retain_round(self.engine.round());
        self.next_tick = None;
    }

    /// Runs the clock forward by `ms`, applying completions and timer ticks in time order.
    ///
    /// A completion and a tick falling due at the same instant apply completion first.
    pub fn advance(&mut self, ms: Millis) {
        let target = self.now().saturating_add(ms);
        loop {
            let completion_at = self.timeline.next_due().filter(|&at| at <= target);
            let tick_at = self.next_tick.filter(|&at| at <= target);
            match (completion_at, tick_at) {
                (Some(c), Some(t)) if t < c => self.fire_tick(t),
                (Some(c), _) => self.fire_completion(c),
                (None, Some(t)) => self.fire_tick(t),
                (None, None) => break,
            }
        }
        self.timeline.advance_to(target);
    }

    fn fire_completion(&mut self, at: Millis) {
        self.timeline.advance_to(at);
        let Some(completion) = self.timeline.pop_due() else {
            return;
        };
        match self.engine.complete(completion) {
            CompleteOutcome::Won(redeal) => {
                self.next_tick = None;
                self.timeline.schedule(redeal);
            }
            CompleteOutcome::Redealt => self.on_deal(),
            _ => {}
        }
    }

    fn fire_tick(&mut self, at: Millis) {
        self.timeline.advance_to(at);
        if self.engine.tick(self.engine.round()) {
            self.next_tick = Some(at.saturating_add(TICK_INTERVAL_MS));
        } else {
            self.next_tick = None;
        }
    }
}
