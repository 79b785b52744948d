//! Ordered concurrent and sequential collection processing.
//!
//! Concurrent mode drives every per-element future on the caller's task and
//! never spawns. Results always come back in input order, whatever order the
//! futures finish in. The first failure wins: remaining futures are dropped
//! and no partial output is returned.

use std::future::Future;

use futures_util::future::try_join_all;
use pacer_types::{Execution, Truthy};

/// Await every future concurrently, returning outputs in input order.
pub async fn parallel<I, Fut, T, E>(futures: I) -> Result<Vec<T>, E>
where
    I: IntoIterator<Item = Fut>,
    Fut: Future<Output = Result<T, E>>,
{
    try_join_all(futures).await
}

/// Apply `transform` to every item, preserving input order in the output.
pub async fn async_map<T, R, E, F, Fut>(
    items: impl IntoIterator<Item = T>,
    execution: Execution,
    mut transform: F,
) -> Result<Vec<R>, E>
where
    F: FnMut(T) -> Fut,
    Fut: Future<Output = Result<R, E>>,
{
    match execution {
        Execution::Concurrent => parallel(items.into_iter().map(transform)).await,
        Execution::Sequential => {
            let items = items.into_iter();
            let mut out = Vec::with_capacity(items.size_hint().0);
            for item in items {
                out.push(transform(item).await?);
            }
            Ok(out)
        }
    }
}

/// Keep the items whose predicate result is truthy, in input order.
///
/// The predicate borrows each item only while creating its future; the future
/// itself must own whatever it needs.
pub async fn async_filter<T, B, E, P, Fut>(
    items: Vec<T>,
    execution: Execution,
    mut predicate: P,
) -> Result<Vec<T>, E>
where
    P: FnMut(&T) -> Fut,
    Fut: Future<Output = Result<B, E>>,
    B: Truthy,
{
    match execution {
        Execution::Concurrent => {
            let verdicts = parallel(items.iter().map(&mut predicate)).await?;
            Ok(items
                .into_iter()
                .zip(verdicts)
                .filter_map(|(item, keep)| keep.is_truthy().then_some(item))
                .collect())
        }
        Execution::Sequential => {
            let mut kept = Vec::new();
            for item in items {
                if predicate(&item).await?.is_truthy() {
                    kept.push(item);
                }
            }
            Ok(kept)
        }
    }
}
