//! Bridges from futures to callback-style call sites.
//!
//! These sit outside the primitives' own contracts: nothing in this crate
//! depends on them.

use std::fmt::Display;
use std::future::Future;

use tokio::task::JoinHandle;

/// Await `future` and report its outcome through a two-argument callback.
///
/// The callback runs exactly once, with `(Some(err), None)` on failure and
/// `(None, Some(value))` on success.
pub async fn nodeify<Fut, T, E, C>(future: Fut, callback: C)
where
    Fut: Future<Output = Result<T, E>>,
    C: FnOnce(Option<E>, Option<T>),
{
    match future.await {
        Ok(value) => callback(None, Some(value)),
        Err(err) => callback(Some(err), None),
    }
}

/// Run `future` in the background on the current runtime.
///
/// A failure is logged at warn level. The handle can be awaited or dropped;
/// dropping it does not cancel the task.
///
/// # Panics
///
/// Panics if called outside a tokio runtime.
pub fn asyncify<Fut, E>(future: Fut) -> JoinHandle<()>
where
    Fut: Future<Output = Result<(), E>> + Send + 'static,
    E: Display + Send + 'static,
{
    tokio::spawn(async move {
        if let Err(err) = future.await {
            tracing::warn!(error = %err, "Background task failed");
        }
    })
}
