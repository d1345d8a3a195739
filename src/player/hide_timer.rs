// SPDX-License-Identifier: MPL-2.0
//! The single hide timer owned by the visibility machine.
//!
//! There is no ambient scheduler behind this type. It only records the one
//! outstanding deadline; whoever drives the controller sleeps until
//! [`HideTimer::deadline`] and then calls [`HideTimer::fire`]. Arming always
//! replaces the previous deadline, so a stale timer can never fire.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    deadline: Instant,
    generation: u64,
}

/// At most one pending hide deadline.
#[derive(Debug, Clone, Default)]
pub struct HideTimer {
    pending: Option<Pending>,
    generation: u64,
}

impl HideTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels any pending deadline and arms a new one at `now + delay`.
    pub fn arm(&mut self, now: Instant, delay: Duration) -> Instant {
        self.generation = self.generation.wrapping_add(1);
        let deadline = now + delay;
        if let Some(previous) = self.pending.replace(Pending {
            deadline,
            generation: self.generation,
        }) {
            tracing::trace!(
                replaced = previous.generation,
                generation = self.generation,
                "hide timer re-armed"
            );
        }
        tracing::trace!(
            generation = self.generation,
            delay_ms = delay.as_millis() as u64,
            "hide timer armed"
        );
        deadline
    }

    /// Drops the pending deadline. Returns whether one was armed.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|p| p.deadline)
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Counts every arm since creation; changes whenever the deadline is replaced.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Consumes the deadline if it has been reached.
    ///
    /// Returns `true` exactly once per armed deadline.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.pending {
            Some(pending) if now >= pending.deadline => {
                self.pending = None;
                tracing::trace!(generation = pending.generation, "hide timer fired");
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn new_timer_is_idle() {
        let mut timer = HideTimer::new();
        assert!(!timer.is_armed());
        assert_eq!(timer.deadline(), None);
        assert!(!timer.fire(Instant::now()));
    }

    #[test]
    fn fires_once_at_deadline() {
        let start = Instant::now();
        let mut timer = HideTimer::new();
        let deadline = timer.arm(start, ms(3000));

        assert!(!timer.fire(start + ms(2999)));
        assert!(timer.fire(deadline));
        assert!(!timer.fire(deadline + ms(1)));
        assert!(!timer.is_armed());
    }

    #[test]
    fn arming_twice_leaves_exactly_one_deadline() {
        let start = Instant::now();
        let mut timer = HideTimer::new();
        timer.arm(start, ms(3000));
        timer.arm(start + ms(100), ms(3000));

        assert_eq!(timer.deadline(), Some(start + ms(3100)));
        assert_eq!(timer.generation(), 2);
        // The first deadline passes without firing
        assert!(!timer.fire(start + ms(3000)));
        assert!(timer.fire(start + ms(3100)));
        assert!(!timer.fire(start + ms(10_000)));
    }

    #[test]
    fn shorter_rearm_replaces_longer_deadline() {
        let start = Instant::now();
        let mut timer = HideTimer::new();
        timer.arm(start, ms(3000));
        timer.arm(start, ms(1000));
        assert!(timer.fire(start + ms(1000)));
    }

    #[test]
    fn cancel_prevents_firing() {
        let start = Instant::now();
        let mut timer = HideTimer::new();
        timer.arm(start, ms(1000));

        assert!(timer.cancel());
        assert!(!timer.cancel());
        assert!(!timer.fire(start + ms(5000)));
    }
}
