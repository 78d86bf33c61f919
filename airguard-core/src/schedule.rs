//! Fixed-interval cadence for tick-driven hosts
//!
//! On bare metal the report loop simply blocks for the interval after each
//! cycle. A host that owns its own timer (an executor tick, a GUI frame, a
//! test clock) instead polls [`Cadence::is_due`] and records when a cycle
//! finished. The ordering is the same as the blocking loop:
//!
//! ```text
//! cycle ─ interval ─ cycle ─ interval ─ ...
//! ```
//!
//! The next cycle is due one interval after the previous one *finished*. A
//! slow cycle pushes every later one back; there is no catch-up and nothing
//! is dropped.
//!
//! ```rust
//! use airguard_core::Cadence;
//! use fugit::MillisDurationU64;
//!
//! let mut cadence = Cadence::new(MillisDurationU64::millis(1000));
//! assert!(cadence.is_due(0));
//!
//! cadence.completed_at(1_250); // cycle overran
//! assert!(!cadence.is_due(2_000));
//! assert!(cadence.is_due(2_250));
//! ```

use fugit::MillisDurationU64;

use crate::time::Timestamp;

/// Interval scheduler measured from the end of the previous cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    interval_ms: u64,
    next_due: Option<Timestamp>,
}

impl Cadence {
    /// Cadence that is due immediately, then every `interval`
    pub const fn new(interval: MillisDurationU64) -> Self {
        Self {
            interval_ms: interval.to_millis(),
            next_due: None,
        }
    }

    /// Configured interval in milliseconds
    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// When the next cycle may run, `None` before the first one
    pub fn next_due(&self) -> Option<Timestamp> {
        self.next_due
    }

    /// Whether a cycle should run at `now`
    pub fn is_due(&self, now: Timestamp) -> bool {
        self.next_due.map_or(true, |due| now >= due)
    }

    /// Milliseconds until the next cycle, 0 if already due
    pub fn remaining_ms(&self, now: Timestamp) -> u64 {
        self.next_due.map_or(0, |due| due.saturating_sub(now))
    }

    /// Record that a cycle finished at `finished`
    pub fn completed_at(&mut self, finished: Timestamp) {
        self.next_due = Some(finished.saturating_add(self.interval_ms));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_second() -> Cadence {
        Cadence::new(MillisDurationU64::millis(1000))
    }

    #[test]
    fn first_tick_is_due() {
        let cadence = one_second();
        assert!(cadence.is_due(0));
        assert_eq!(cadence.next_due(), None);
        assert_eq!(cadence.remaining_ms(0), 0);
    }

    #[test]
    fn interval_measured_from_completion() {
        let mut cadence = one_second();
        cadence.completed_at(100);

        assert!(!cadence.is_due(1_099));
        assert!(cadence.is_due(1_100));
        assert_eq!(cadence.remaining_ms(600), 500);
    }

    #[test]
    fn late_ticks_do_not_catch_up() {
        let mut cadence = one_second();
        cadence.completed_at(0);

        // Host stalled for 5 s: one cycle runs, not five
        assert!(cadence.is_due(5_000));
        cadence.completed_at(5_010);
        assert!(!cadence.is_due(5_500));
        assert_eq!(cadence.next_due(), Some(6_010));
    }
}
