//! Config files on disk feeding the primitives' options.

use std::convert::Infallible;

use pacer_config::{ConfigError, PacerConfig};
use pacer_core::{Execution, LongSleepOptions, WaitOptions};
use tempfile::tempdir;

use crate::common::{ms, write_config};

#[test]
fn full_file_overrides_every_default() {
    let dir = tempdir().unwrap();
    let path = write_config(
        dir.path(),
        r#"
[log]
level = "debug"

[sleep]
threshold_ms = 2000
interval_ms = 250

[wait]
wait_ms = 30000
interval_ms = 1000

[retry]
attempts = 5
interval_ms = 400

[each]
execution = "sequential"
"#,
    );

    let config = PacerConfig::load_from(&path).unwrap().unwrap();
    assert_eq!(config.log_level().as_deref(), Some("debug"));

    let sleep = config.sleep_options();
    assert_eq!(sleep.threshold, ms(2000));
    assert_eq!(sleep.interval, ms(250));

    let wait: WaitOptions<'_, Infallible> = config.wait_options();
    assert_eq!(wait.wait, ms(30_000));
    assert_eq!(wait.interval, ms(1000));

    assert_eq!(config.retry_attempts().unwrap().get(), 5);
    assert_eq!(config.retry_interval(), Some(ms(400)));
    assert_eq!(config.execution(), Execution::Sequential);
}

#[test]
fn empty_file_keeps_defaults() {
    let dir = tempdir().unwrap();
    let path = write_config(dir.path(), "");

    let config = PacerConfig::load_from(&path).unwrap().unwrap();
    let defaults = LongSleepOptions::default();
    let sleep = config.sleep_options();
    assert_eq!(sleep.threshold, defaults.threshold);
    assert_eq!(sleep.interval, defaults.interval);

    let wait: WaitOptions<'_, Infallible> = config.wait_options();
    assert_eq!(wait.wait, WaitOptions::<Infallible>::DEFAULT_WAIT);
    assert_eq!(config.retry_attempts().unwrap().get(), 3);
    assert_eq!(config.retry_interval(), None);
    assert_eq!(config.execution(), Execution::Concurrent);
}

#[test]
fn missing_file_is_none() {
    let dir = tempdir().unwrap();
    let loaded = PacerConfig::load_from(&dir.path().join("absent.toml")).unwrap();
    assert!(loaded.is_none());
}

#[test]
fn malformed_file_reports_path() {
    let dir = tempdir().unwrap();
    let path = write_config(dir.path(), "[retry\nattempts = 3\n");

    let err = PacerConfig::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert_eq!(err.path(), &path);
}

#[test]
fn zero_attempts_rejected_at_load() {
    let dir = tempdir().unwrap();
    let path = write_config(dir.path(), "[retry]\nattempts = 0\n");

    let err = PacerConfig::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { .. }));
    assert!(err.to_string().contains("at least 1"), "{err}");
}
