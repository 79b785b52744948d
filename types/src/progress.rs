//! Long-sleep options and the per-tick progress snapshot.

use std::time::Duration;

use serde::Serialize;

/// Snapshot handed to a long-sleep observer once per interval tick.
///
/// `time_left_ms` is signed: the final tick lands on or past the deadline,
/// so it reports zero or a small negative overshoot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    pub elapsed_ms: u64,
    pub time_left_ms: i64,
    /// `elapsed / total`, reaching at least `1.0` on the final tick.
    pub progress: f64,
}

impl Progress {
    #[must_use]
    pub fn new(elapsed: Duration, time_left_ms: i64, total: Duration) -> Self {
        let progress = if total.is_zero() {
            1.0
        } else {
            elapsed.as_secs_f64() / total.as_secs_f64()
        };
        Self {
            elapsed_ms: duration_ms(elapsed),
            time_left_ms,
            progress,
        }
    }

    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.time_left_ms <= 0
    }
}

/// Saturating millisecond count of a duration.
#[must_use]
pub fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Options for splitting a long sleep into short re-checked intervals.
///
/// Sleeps shorter than `threshold` are a single timer. Longer sleeps wake
/// every `interval` to re-read the clock, bounding timer drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LongSleepOptions {
    pub threshold: Duration,
    pub interval: Duration,
}

impl LongSleepOptions {
    pub const DEFAULT_THRESHOLD: Duration = Duration::from_millis(5000);
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(1000);

    #[must_use]
    pub const fn with_threshold(mut self, threshold: Duration) -> Self {
        self.threshold = threshold;
        self
    }

    #[must_use]
    pub const fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Whether a sleep of `total` is split into interval ticks.
    #[must_use]
    pub fn is_long(&self, total: Duration) -> bool {
        total >= self.threshold
    }
}

impl Default for LongSleepOptions {
    fn default() -> Self {
        Self {
            threshold: Self::DEFAULT_THRESHOLD,
            interval: Self::DEFAULT_INTERVAL,
        }
    }
}
