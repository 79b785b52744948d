//! Condition-poll options and errors.

use std::convert::Infallible;
use std::error::Error;
use std::fmt;
use std::time::Duration;

use crate::progress::duration_ms;

/// What a condition poll fails with once its time budget runs out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OnTimeout<E> {
    /// Generic timeout error stating the elapsed time.
    #[default]
    Default,
    /// Generic error carrying this message.
    Message(String),
    /// This exact error value.
    Cause(E),
}

/// Optional sink for poll progress messages.
pub trait WaitLogger {
    fn debug(&self, message: &str);
}

impl<F> WaitLogger for F
where
    F: Fn(&str),
{
    fn debug(&self, message: &str) {
        self(message);
    }
}

/// Options for a condition poll.
///
/// `E` is the condition's error type; infallible conditions use the default.
pub struct WaitOptions<'a, E = Infallible> {
    pub wait: Duration,
    pub interval: Duration,
    pub on_timeout: OnTimeout<E>,
    pub logger: Option<&'a dyn WaitLogger>,
}

impl<'a, E> WaitOptions<'a, E> {
    pub const DEFAULT_WAIT: Duration = Duration::from_millis(5000);
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);

    #[must_use]
    pub fn with_wait(mut self, wait: Duration) -> Self {
        self.wait = wait;
        self
    }

    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.on_timeout = OnTimeout::Message(message.into());
        self
    }

    #[must_use]
    pub fn with_cause(mut self, cause: E) -> Self {
        self.on_timeout = OnTimeout::Cause(cause);
        self
    }

    #[must_use]
    pub fn with_logger(mut self, logger: &'a dyn WaitLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Emit a progress line through the logger, if one is set.
    pub fn log_waited(&self, waited: Duration) {
        if let Some(logger) = self.logger {
            logger.debug(&format!("Waited for {} ms so far", duration_ms(waited)));
        }
    }
}

impl<E> Default for WaitOptions<'_, E> {
    fn default() -> Self {
        Self {
            wait: Self::DEFAULT_WAIT,
            interval: Self::DEFAULT_INTERVAL,
            on_timeout: OnTimeout::Default,
            logger: None,
        }
    }
}

impl<E: fmt::Debug> fmt::Debug for WaitOptions<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WaitOptions")
            .field("wait", &self.wait)
            .field("interval", &self.interval)
            .field("on_timeout", &self.on_timeout)
            .field("logger", &self.logger.map(|_| "<logger>"))
            .finish()
    }
}

/// Failure of a condition poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitError<E> {
    /// The condition itself failed; it is never re-polled after that.
    Condition(E),
    /// The budget ran out without a caller-supplied timeout error.
    TimedOut { elapsed: Duration },
    /// The budget ran out and the caller supplied a message.
    Message(String),
    /// The budget ran out and the caller supplied this error.
    Cause(E),
}

impl<E> WaitError<E> {
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        !matches!(self, WaitError::Condition(_))
    }

    /// Build the error for a budget exhausted after `elapsed`.
    pub fn timed_out(on_timeout: OnTimeout<E>, elapsed: Duration) -> Self {
        match on_timeout {
            OnTimeout::Default => WaitError::TimedOut { elapsed },
            OnTimeout::Message(message) => WaitError::Message(message),
            OnTimeout::Cause(cause) => WaitError::Cause(cause),
        }
    }
}

impl<E: fmt::Display> fmt::Display for WaitError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaitError::Condition(err) | WaitError::Cause(err) => err.fmt(f),
            WaitError::TimedOut { elapsed } => write!(
                f,
                "Condition unmet after {} ms. Timing out.",
                duration_ms(*elapsed)
            ),
            WaitError::Message(message) => f.write_str(message),
        }
    }
}

impl<E> Error for WaitError<E>
where
    E: Error + 'static,
{
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            WaitError::Condition(err) | WaitError::Cause(err) => Some(err),
            WaitError::TimedOut { .. } | WaitError::Message(_) => None,
        }
    }
}
