//! Core domain types for Pacer.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! The async primitives in `pacer-core` and the loaders in `pacer-config` both build on it.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory
#![allow(clippy::missing_panics_doc)] // Panics are documented in assertions

mod attempts;
mod progress;
mod truthy;
mod wait;

pub use attempts::{Attempts, UsageError};
pub use progress::{LongSleepOptions, Progress, duration_ms};
pub use truthy::Truthy;
pub use wait::{OnTimeout, WaitError, WaitLogger, WaitOptions};

use serde::{Deserialize, Serialize};

// ============================================================================
// Execution Mode
// ============================================================================

/// How a collection operation drives its per-element futures.
///
/// `Concurrent` only guarantees result order. `Sequential` also guarantees
/// that side effects happen in input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Execution {
    #[default]
    Concurrent,
    Sequential,
}

impl Execution {
    #[must_use]
    pub const fn is_concurrent(self) -> bool {
        matches!(self, Execution::Concurrent)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Execution::Concurrent => "concurrent",
            Execution::Sequential => "sequential",
        }
    }
}
