//! Async control-flow primitives for Pacer.
//!
//! Everything here runs on the caller's task: sleeps register a timer,
//! retries and polls loop in place, and concurrent mapping interleaves
//! futures without spawning. Only [`asyncify`] hands work to the runtime.
//!
//! ```text
//! sleep ─┬─ long_sleep / long_sleep_with_progress
//!        ├─ retry_interval        (retry + pause between failures)
//!        └─ wait_for_condition    (poll until truthy or budget spent)
//! async_map / async_filter ── parallel
//! ```
//!
//! Time is read from `tokio::time::Instant`, so a paused runtime clock makes
//! every primitive deterministic under test.

mod budget;
mod callback;
mod map;
mod retry;
mod sleep;
mod wait;

pub use callback::{asyncify, nodeify};
pub use map::{async_filter, async_map, parallel};
pub use retry::{retry, retry_interval};
pub use sleep::{long_sleep, long_sleep_with_progress, sleep};
pub use wait::{TracingLogger, wait_for_condition, wait_until};

pub use pacer_types::{
    Attempts, Execution, LongSleepOptions, OnTimeout, Progress, Truthy, UsageError, WaitError,
    WaitLogger, WaitOptions,
};
