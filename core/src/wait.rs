//! Condition polling with a fixed time budget.

use std::convert::Infallible;
use std::future::Future;

use pacer_types::{Truthy, WaitError, WaitLogger, WaitOptions, duration_ms};
use tokio::time::Instant;

use crate::budget::WaitBudget;
use crate::sleep::sleep;

/// [`WaitLogger`] that forwards poll progress to `tracing` at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl WaitLogger for TracingLogger {
    fn debug(&self, message: &str) {
        tracing::debug!("{message}");
    }
}

/// Evaluate `condition` until it yields a truthy value or `options.wait` runs out.
///
/// The truthy value itself is returned. A failing condition is not retried:
/// its error comes back immediately as [`WaitError::Condition`]. The
/// condition is always evaluated at least once, even with a zero budget.
///
/// An evaluation already in progress when the budget runs out is awaited to
/// completion; the budget only stops further polls.
pub async fn wait_for_condition<F, Fut, T, E>(
    mut condition: F,
    options: WaitOptions<'_, E>,
) -> Result<T, WaitError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    T: Truthy,
{
    let budget = WaitBudget::start(options.wait, options.interval);
    let mut polls: u32 = 0;
    loop {
        let result = condition().await.map_err(WaitError::Condition)?;
        polls += 1;
        if result.is_truthy() {
            return Ok(result);
        }

        let now = Instant::now();
        let waited = budget.elapsed_at(now);
        if budget.is_exhausted_at(now) {
            tracing::debug!(polls, waited_ms = duration_ms(waited), "Condition unmet");
            return Err(WaitError::timed_out(options.on_timeout, waited));
        }

        options.log_waited(waited);
        sleep(budget.next_pause_at(now)).await;
    }
}

/// [`wait_for_condition`] for conditions that cannot fail.
pub async fn wait_until<F, Fut, T>(
    mut condition: F,
    options: WaitOptions<'_, Infallible>,
) -> Result<T, WaitError<Infallible>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = T>,
    T: Truthy,
{
    wait_for_condition(
        || {
            let fut = condition();
            async move { Ok(fut.await) }
        },
        options,
    )
    .await
}
