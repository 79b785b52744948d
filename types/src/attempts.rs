//! Retry attempt budget.
//!
//! A zero-attempt retry has no meaningful result, so `Attempts` rejects it at
//! construction instead of letting a retry loop fall through without a value.

use std::fmt;
use std::num::NonZeroU32;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("retry attempts must be at least 1")]
    ZeroAttempts,
}

/// Maximum number of times a retried operation is invoked (initial call included).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Attempts(NonZeroU32);

impl Attempts {
    pub const ONE: Attempts = Attempts(NonZeroU32::MIN);

    pub fn new(attempts: u32) -> Result<Self, UsageError> {
        NonZeroU32::new(attempts)
            .map(Self)
            .ok_or(UsageError::ZeroAttempts)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Whether `attempt` (1-based) is the last one the budget allows.
    #[must_use]
    pub const fn is_last(self, attempt: u32) -> bool {
        attempt >= self.0.get()
    }
}

impl TryFrom<u32> for Attempts {
    type Error = UsageError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Attempts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
