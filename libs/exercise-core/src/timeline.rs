//! Logical clock with a timer queue.
//!
//! Delayed effects are parked here and handed back in deadline order when
//! the clock is advanced. Nothing runs on its own; the owner pulls due
//! actions with [`Timeline::pop_due`]. Dropping the timeline cancels
//! everything still pending.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::effect::Effect;

#[derive(Debug, Clone)]
pub struct Timeline<A> {
    now: Duration,
    seq: u64,
    queue: BTreeMap<(Duration, u64), A>,
}

impl<A> Timeline<A> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            seq: 0,
            queue: BTreeMap::new(),
        }
    }

    /// Time elapsed since the timeline was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn schedule(&mut self, after: Duration, action: A) {
        let deadline = self.now + after;
        self.queue.insert((deadline, self.seq), action);
        self.seq += 1;
    }

    /// Schedule the action of a delayed effect; `Effect::None` is dropped.
    pub fn schedule_effect(&mut self, effect: Effect<A>) {
        if let Effect::Delayed { after, action } = effect {
            self.schedule(after, action);
        }
    }

    /// Pop the earliest action due at or before `until`, moving the clock
    /// to its deadline. Actions sharing a deadline come out in the order
    /// they were scheduled.
    pub fn pop_due(&mut self, until: Duration) -> Option<A> {
        let entry = self.queue.first_entry()?;
        let (deadline, _) = *entry.key();
        if deadline > until {
            return None;
        }
        let action = entry.remove();
        self.now = self.now.max(deadline);
        Some(action)
    }

    /// Move the clock forward to `until` once due actions are drained.
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    /// Advance by `by` and return every action that came due, in order.
    ///
    /// Use [`Timeline::pop_due`] directly when handling an action may
    /// schedule further ones inside the same window.
    pub fn advance(&mut self, by: Duration) -> Vec<A> {
        let until = self.now + by;
        let mut fired = Vec::new();
        while let Some(action) = self.pop_due(until) {
            fired.push(action);
        }
        self.settle(until);
        fired
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.keys().next().map(|(deadline, _)| *deadline)
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Drop every pending action without running it.
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

impl<A> Default for Timeline<A> {
    fn default() -> Self {
        Self::new()
    }
}
