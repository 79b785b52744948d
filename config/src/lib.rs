//! Configuration loading for Pacer.
//!
//! The config file is optional. Every section and every field in it is
//! optional too; anything left out falls back to the primitives' defaults.
//!
//! ```toml
//! [log]
//! level = "debug"
//!
//! [sleep]
//! threshold_ms = 5000
//! interval_ms = 1000
//!
//! [wait]
//! wait_ms = 5000
//! interval_ms = 500
//!
//! [retry]
//! attempts = 3
//! interval_ms = 250
//!
//! [each]
//! execution = "sequential"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs, io};

use pacer_types::{Attempts, Execution, LongSleepOptions, UsageError, WaitOptions};
use serde::Deserialize;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "PACER_CONFIG";

const DEFAULT_RETRY_ATTEMPTS: u32 = 3;

#[derive(Debug, Default, Deserialize)]
pub struct PacerConfig {
    pub log: Option<LogConfig>,
    pub sleep: Option<SleepConfig>,
    pub wait: Option<WaitConfig>,
    pub retry: Option<RetryConfig>,
    pub each: Option<EachConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid config at {}: {source}", path.display())]
    Invalid { path: PathBuf, source: UsageError },
}

impl ConfigError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LogConfig {
    /// Default `EnvFilter` directive when `RUST_LOG` is unset. `${VAR}` is expanded.
    pub level: Option<String>,
}

impl LogConfig {
    #[must_use]
    pub fn level(&self) -> Option<String> {
        self.level
            .as_deref()
            .map(expand_env_vars)
            .filter(|level| !level.trim().is_empty())
    }
}

/// Long-sleep tuning.
///
/// ```toml
/// [sleep]
/// threshold_ms = 5000
/// interval_ms = 1000
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct SleepConfig {
    pub threshold_ms: Option<u64>,
    pub interval_ms: Option<u64>,
}

impl SleepConfig {
    #[must_use]
    pub fn options(&self) -> LongSleepOptions {
        let mut options = LongSleepOptions::default();
        if let Some(ms) = self.threshold_ms {
            options = options.with_threshold(Duration::from_millis(ms));
        }
        if let Some(ms) = self.interval_ms {
            options = options.with_interval(Duration::from_millis(ms));
        }
        options
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct WaitConfig {
    pub wait_ms: Option<u64>,
    pub interval_ms: Option<u64>,
}

impl WaitConfig {
    /// Overlay the configured timings onto `options`.
    #[must_use]
    pub fn apply<'a, E>(&self, mut options: WaitOptions<'a, E>) -> WaitOptions<'a, E> {
        if let Some(ms) = self.wait_ms {
            options = options.with_wait(Duration::from_millis(ms));
        }
        if let Some(ms) = self.interval_ms {
            options = options.with_interval(Duration::from_millis(ms));
        }
        options
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RetryConfig {
    /// Total attempts including the first. Default: 3. Zero is rejected at load.
    pub attempts: Option<u32>,
    /// Pause between failed attempts. Default: no pause.
    pub interval_ms: Option<u64>,
}

impl RetryConfig {
    pub fn attempts(&self) -> Result<Attempts, UsageError> {
        Attempts::new(self.attempts.unwrap_or(DEFAULT_RETRY_ATTEMPTS))
    }

    #[must_use]
    pub fn interval(&self) -> Option<Duration> {
        self.interval_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct EachConfig {
    #[serde(default)]
    pub execution: Execution,
}

/// Replace `${VAR}` references with the variable's value (empty if unset).
pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        let Some(end_rel) = rest[start + 2..].find('}') else {
            break;
        };
        out.push_str(&rest[..start]);
        let var = &rest[start + 2..start + 2 + end_rel];
        if !var.is_empty() {
            out.push_str(&env::var(var).unwrap_or_default());
        }
        rest = &rest[start + 2 + end_rel + 1..];
    }

    out.push_str(rest);
    out
}

impl PacerConfig {
    /// Load from [`config_path`]. A missing file is `Ok(None)`.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    /// Load from an explicit path. A missing file is `Ok(None)`.
    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        let config: Self = match toml::from_str(&content) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                return Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        config.validate().map_err(|source| ConfigError::Invalid {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Some(config))
    }

    fn validate(&self) -> Result<(), UsageError> {
        if let Some(retry) = &self.retry {
            retry.attempts()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn log_level(&self) -> Option<String> {
        self.log.as_ref().and_then(LogConfig::level)
    }

    #[must_use]
    pub fn sleep_options(&self) -> LongSleepOptions {
        self.sleep
            .as_ref()
            .map(SleepConfig::options)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn wait_options<'a, E>(&self) -> WaitOptions<'a, E> {
        match &self.wait {
            Some(wait) => wait.apply(WaitOptions::default()),
            None => WaitOptions::default(),
        }
    }

    pub fn retry_attempts(&self) -> Result<Attempts, UsageError> {
        match &self.retry {
            Some(retry) => retry.attempts(),
            None => Attempts::new(DEFAULT_RETRY_ATTEMPTS),
        }
    }

    #[must_use]
    pub fn retry_interval(&self) -> Option<Duration> {
        self.retry.as_ref().and_then(RetryConfig::interval)
    }

    #[must_use]
    pub fn execution(&self) -> Execution {
        self.each
            .as_ref()
            .map(|each| each.execution)
            .unwrap_or_default()
    }
}

/// `$PACER_CONFIG` if set and non-empty, else `~/.pacer/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    if let Some(explicit) = env::var_os(CONFIG_ENV_VAR).filter(|value| !value.is_empty()) {
        return Some(PathBuf::from(explicit));
    }
    dirs::home_dir().map(|home| home.join(".pacer").join("config.toml"))
}
