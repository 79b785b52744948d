//! Bounded retry of fallible async operations.
//!
//! # Retry Policy
//!
//! - Attempts are strictly sequential; the next starts only after the
//!   previous one failed.
//! - The first success is returned immediately; nothing runs after it.
//! - When the budget is exhausted the error from the *final* attempt is
//!   returned. Earlier errors are dropped.
//! - `retry_interval` pauses between failed attempts, but never after the
//!   attempt that exhausts the budget.

use std::future::Future;
use std::time::Duration;

use pacer_types::Attempts;

use crate::sleep::sleep;

/// Run `operation` until it succeeds, at most `attempts` times.
///
/// Arguments the operation needs are captured by the closure; it is called
/// afresh for every attempt.
pub async fn retry<F, Fut, T, E>(attempts: Attempts, operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    run_attempts(attempts, None, operation).await
}

/// Like [`retry`], sleeping `pause` after each failed attempt except the last.
pub async fn retry_interval<F, Fut, T, E>(
    attempts: Attempts,
    pause: Duration,
    operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    run_attempts(attempts, Some(pause), operation).await
}

async fn run_attempts<F, Fut, T, E>(
    attempts: Attempts,
    pause: Option<Duration>,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt = 1;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if attempts.is_last(attempt) => return Err(err),
            Err(_) => {
                tracing::debug!(
                    attempt,
                    max_attempts = attempts.get(),
                    pause = ?pause,
                    "Attempt failed, retrying"
                );
                if let Some(pause) = pause {
                    sleep(pause).await;
                }
                attempt += 1;
            }
        }
    }
}
