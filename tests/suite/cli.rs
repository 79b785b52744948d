//! End-to-end runs of the `pacer` binary.

#![cfg(unix)]

use std::fs;
use std::time::{Duration, Instant};

use tempfile::tempdir;

use crate::common::{pacer_bin, write_config};

#[test]
fn sleep_waits_at_least_requested_time() {
    let started = Instant::now();
    let status = pacer_bin().args(["sleep", "50"]).status().unwrap();
    assert!(status.success());
    assert!(started.elapsed() >= Duration::from_millis(50));
}

#[test]
fn retry_returns_final_exit_code() {
    let output = pacer_bin()
        .args(["retry", "-n", "2", "--", "sh", "-c", "exit 4"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn retry_stops_after_first_success() {
    let dir = tempdir().unwrap();
    let counter = dir.path().join("runs");
    let script = format!("echo run >> {}", counter.display());

    let status = pacer_bin()
        .args(["retry", "-n", "5", "--", "sh", "-c", &script])
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(fs::read_to_string(&counter).unwrap().lines().count(), 1);
}

#[test]
fn retry_rejects_zero_attempts() {
    let output = pacer_bin()
        .args(["retry", "-n", "0", "--", "true"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("at least 1"), "{stderr}");
}

#[test]
fn missing_program_exits_127() {
    let output = pacer_bin()
        .args(["retry", "-n", "1", "--", "pacer-test-no-such-program"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(127));
}

#[test]
fn wait_succeeds_once_file_appears() {
    let dir = tempdir().unwrap();
    let marker = dir.path().join("ready");
    let script = format!(
        "if [ -e {0} ]; then exit 0; else touch {0}; exit 1; fi",
        marker.display()
    );

    let status = pacer_bin()
        .args(["wait", "--wait-ms", "5000", "--interval-ms", "20", "--", "sh", "-c", &script])
        .status()
        .unwrap();
    assert!(status.success());
}

#[test]
fn wait_times_out_with_message() {
    let output = pacer_bin()
        .args([
            "wait",
            "--wait-ms",
            "100",
            "--interval-ms",
            "20",
            "--message",
            "marker never appeared",
            "--",
            "false",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("marker never appeared"), "{stderr}");
}

#[test]
fn each_prints_results_in_item_order() {
    let output = pacer_bin()
        .args([
            "each", "--items", "3,1,2", "--", "sh", "-c", "sleep 0.0$0; exit 0", "{}",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, "3: ok\n1: ok\n2: ok\n");
}

#[test]
fn each_reports_failures() {
    let output = pacer_bin()
        .args(["each", "--items", "0,2", "--", "sh", "-c", "exit $0", "{}"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, "0: ok\n2: exit 2\n");
}

#[test]
fn config_file_sets_retry_attempts() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path(), "[retry]\nattempts = 3\n");
    let counter = dir.path().join("runs");
    let script = format!("echo run >> {}; exit 1", counter.display());

    let output = pacer_bin()
        .env("PACER_CONFIG", &config)
        .args(["retry", "--", "sh", "-c", &script])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(fs::read_to_string(&counter).unwrap().lines().count(), 3);
}

#[test]
fn config_flag_overrides_environment() {
    let dir = tempdir().unwrap();
    let broken = dir.path().join("broken.toml");
    fs::write(&broken, "not toml [").unwrap();
    let good = write_config(dir.path(), "[retry]\nattempts = 1\n");

    let output = pacer_bin()
        .env("PACER_CONFIG", &broken)
        .args(["--config"])
        .arg(&good)
        .args(["retry", "--", "true"])
        .output()
        .unwrap();
    assert!(output.status.success());
}
