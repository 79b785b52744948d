//! Plain and drift-bounded sleeps.
//!
//! Long timers on some platforms fire late by seconds over tens of minutes.
//! `long_sleep` splits the wait into short ticks and re-reads the clock after
//! each one, so the total wait is bounded by the deadline rather than by the
//! sum of nominal tick lengths.

use std::convert::Infallible;
use std::time::Duration;

use pacer_types::{LongSleepOptions, Progress};
use tokio::time::Instant;

use crate::budget::WaitBudget;

/// Suspend the current task for `duration`.
///
/// Registers a single timer and resumes no earlier than `duration` from now.
pub async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}

/// Sleep for `total`, re-checking the clock every `options.interval` once
/// `total` reaches `options.threshold`.
pub async fn long_sleep(total: Duration, options: LongSleepOptions) {
    let result = long_sleep_with_progress(total, options, |_| Ok::<(), Infallible>(())).await;
    match result {
        Ok(()) => {}
        Err(never) => match never {},
    }
}

/// Like [`long_sleep`], reporting a [`Progress`] snapshot after every tick.
///
/// The observer runs synchronously on the sleeping task. If it returns an
/// error the sleep stops immediately and the error is returned. Below the
/// threshold the observer is never called.
pub async fn long_sleep_with_progress<F, E>(
    total: Duration,
    options: LongSleepOptions,
    mut observer: F,
) -> Result<(), E>
where
    F: FnMut(Progress) -> Result<(), E>,
{
    if !options.is_long(total) {
        sleep(total).await;
        return Ok(());
    }

    let budget = WaitBudget::start(total, options.interval);
    let mut elapsed = Duration::ZERO;
    loop {
        let before = Instant::now();
        sleep(budget.next_pause_at(before)).await;
        let after = Instant::now();

        // Observed, not nominal: scheduler jitter is counted.
        elapsed += after.saturating_duration_since(before);
        let time_left_ms = budget.time_left_ms_at(after);
        let progress = Progress::new(elapsed, time_left_ms, total);
        tracing::trace!(
            elapsed_ms = progress.elapsed_ms,
            time_left_ms,
            "long sleep tick"
        );
        observer(progress)?;

        if budget.is_exhausted_at(after) {
            return Ok(());
        }
    }
}
