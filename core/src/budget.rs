//! Fixed-deadline time budget shared by long sleeps and condition polls.
//!
//! The deadline is computed once when the budget starts. Every later decision
//! re-reads the clock against that deadline, so short-interval rounding never
//! accumulates into drift.

use std::time::Duration;

use tokio::time::Instant;

/// Interval floor; a zero interval would spin without yielding to the timer.
pub(crate) const MIN_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct WaitBudget {
    started: Instant,
    deadline: Instant,
    interval: Duration,
}

impl WaitBudget {
    /// Start a budget at the current instant.
    pub(crate) fn start(total: Duration, interval: Duration) -> Self {
        Self::start_at(Instant::now(), total, interval)
    }

    pub(crate) fn start_at(started: Instant, total: Duration, interval: Duration) -> Self {
        Self {
            started,
            deadline: started + total,
            interval: interval.max(MIN_INTERVAL),
        }
    }

    pub(crate) fn elapsed_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started)
    }

    pub(crate) fn is_exhausted_at(&self, now: Instant) -> bool {
        now >= self.deadline
    }

    /// Signed milliseconds until the deadline; negative once it has passed.
    pub(crate) fn time_left_ms_at(&self, now: Instant) -> i64 {
        if now <= self.deadline {
            millis_i64(self.deadline - now)
        } else {
            -millis_i64(now - self.deadline)
        }
    }

    /// Length of the next suspension: one interval, cut short at the deadline.
    pub(crate) fn next_pause_at(&self, now: Instant) -> Duration {
        self.interval
            .min(self.deadline.saturating_duration_since(now))
    }
}

fn millis_i64(duration: Duration) -> i64 {
    i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)
}
