//! Cancellable, single-shot scheduling of delayed phase transitions.
//!
//! The coordinator keeps its own session clock; the runtime advances it in
//! real time. At most one transition is pending: scheduling again replaces
//! (cancels) the previous one, so a force-end racing an auto-end still yields
//! exactly one phase change.

use core::time::Duration;

/// A transition waiting for its deadline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingTransition {
    /// Session-clock time at which the transition fires.
    pub due: Duration,
    /// Distinguishes this schedule from earlier, cancelled ones.
    pub generation: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PhaseTimer {
    pending: Option<PendingTransition>,
    next_generation: u64,
}

impl PhaseTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules a transition `delay` after `now`, cancelling any pending one.
    pub fn schedule(&mut self, now: Duration, delay: Duration) -> PendingTransition {
        if let Some(previous) = self.pending {
            tracing::debug!(generation = previous.generation, "cancelling pending phase transition");
        }
        let pending = PendingTransition {
            due: now + delay,
            generation: self.next_generation,
        };
        self.next_generation += 1;
        self.pending = Some(pending);
        pending
    }

    /// Drops the pending transition. Returns it if there was one.
    pub fn cancel(&mut self) -> Option<PendingTransition> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<PendingTransition> {
        self.pending
    }

    /// Time left until the pending transition is due.
    pub fn remaining(&self, now: Duration) -> Option<Duration> {
        self.pending.map(|pending| pending.due.saturating_sub(now))
    }

    /// Consumes the pending transition if it is due at `now`.
    pub fn take_due(&mut self, now: Duration) -> Option<PendingTransition> {
        match self.pending {
            Some(pending) if pending.due <= now => self.pending.take(),
            _ => None,
        }
    }
}
