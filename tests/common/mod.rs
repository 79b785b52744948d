//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

pub fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

/// Write `contents` to `config.toml` inside `dir`.
pub fn write_config(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("config.toml");
    fs::write(&path, contents).expect("write config");
    path
}

/// The `pacer` binary built for this test run, isolated from any user config.
pub fn pacer_bin() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_pacer"));
    command
        .env("PACER_CONFIG", "/nonexistent/pacer-test-config.toml")
        .env_remove("RUST_LOG");
    command
}
