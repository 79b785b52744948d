//! Primitives driven by options loaded from a config file.

use std::cell::{Cell, RefCell};
use std::convert::Infallible;

use pacer_config::PacerConfig;
use pacer_core::{
    Execution, TracingLogger, WaitError, async_filter, async_map, long_sleep_with_progress,
    retry_interval, sleep, wait_for_condition,
};
use tempfile::tempdir;

use crate::common::{ms, write_config};

fn load(contents: &str) -> PacerConfig {
    let dir = tempdir().unwrap();
    let path = write_config(dir.path(), contents);
    PacerConfig::load_from(&path).unwrap().unwrap()
}

#[tokio::test(start_paused = true)]
async fn retry_section_bounds_attempts() {
    let config = load("[retry]\nattempts = 4\ninterval_ms = 100\n");
    let calls = Cell::new(0);

    let result: Result<(), String> = retry_interval(
        config.retry_attempts().unwrap(),
        config.retry_interval().unwrap(),
        || {
            calls.set(calls.get() + 1);
            let n = calls.get();
            async move { Err(format!("refused #{n}")) }
        },
    )
    .await;

    assert_eq!(result, Err("refused #4".to_string()));
    assert_eq!(calls.get(), 4);
}

#[tokio::test(start_paused = true)]
async fn sleep_section_sets_tick_interval() {
    let config = load("[sleep]\nthreshold_ms = 1000\ninterval_ms = 500\n");
    let mut ticks = 0;

    long_sleep_with_progress(ms(2000), config.sleep_options(), |_| {
        ticks += 1;
        Ok::<_, Infallible>(())
    })
    .await
    .unwrap();

    assert_eq!(ticks, 4);
}

#[tokio::test(start_paused = true)]
async fn wait_section_budget_with_caller_message() {
    let config = load("[wait]\nwait_ms = 300\ninterval_ms = 100\n");
    let logger = TracingLogger;
    let polls = Cell::new(0);

    let err = wait_for_condition(
        || {
            polls.set(polls.get() + 1);
            async { Ok::<_, Infallible>(false) }
        },
        config
            .wait_options()
            .with_logger(&logger)
            .with_message("socket never opened"),
    )
    .await
    .unwrap_err();

    assert_eq!(err, WaitError::Message("socket never opened".into()));
    assert!(polls.get() >= 3);
}

#[tokio::test(start_paused = true)]
async fn each_section_selects_sequential_mapping() {
    let config = load("[each]\nexecution = \"sequential\"\n");
    assert_eq!(config.execution(), Execution::Sequential);
    let finished = RefCell::new(Vec::new());

    let out = async_map([30_u64, 10, 20], config.execution(), |delay| {
        let finished = &finished;
        async move {
            sleep(ms(delay)).await;
            finished.borrow_mut().push(delay);
            Ok::<_, Infallible>(delay / 10)
        }
    })
    .await
    .unwrap();

    assert_eq!(out, [3, 1, 2]);
    assert_eq!(*finished.borrow(), [30, 10, 20]);
}

#[tokio::test(start_paused = true)]
async fn default_execution_filter_fails_as_a_whole() {
    let config = load("");
    assert_eq!(config.execution(), Execution::Concurrent);

    let result = async_filter(
        vec!["api", "db", "cache"],
        config.execution(),
        |name: &&str| {
            let name = *name;
            async move {
                if name == "db" {
                    sleep(ms(50)).await;
                    Err(format!("{name} unreachable"))
                } else {
                    sleep(ms(10)).await;
                    Ok(true)
                }
            }
        },
    )
    .await;

    assert_eq!(result, Err("db unreachable".to_string()));
}
