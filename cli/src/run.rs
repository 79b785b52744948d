//! Subcommand execution.
//!
//! Flags override the config file, which overrides built-in defaults.

use std::process::{ExitCode, ExitStatus};
use std::time::Duration;

use anyhow::{Context, Result};
use pacer_config::PacerConfig;
use pacer_core::{
    Attempts, Execution, LongSleepOptions, Progress, TracingLogger, WaitError, WaitOptions,
    async_map, long_sleep, long_sleep_with_progress, retry, retry_interval, wait_for_condition,
};

use crate::cli::{EachArgs, RetryArgs, SleepArgs, WaitArgs};
use crate::process::{self, CommandError};

pub async fn sleep(args: SleepArgs, config: &PacerConfig) -> Result<ExitCode> {
    let options = sleep_options(&args, config);
    let total = Duration::from_millis(args.ms);

    if args.progress {
        long_sleep_with_progress(total, options, |progress: Progress| {
            tracing::info!(
                elapsed_ms = progress.elapsed_ms,
                time_left_ms = progress.time_left_ms,
                "{:.0}%",
                (progress.progress * 100.0).min(100.0)
            );
            Ok::<(), anyhow::Error>(())
        })
        .await?;
    } else {
        long_sleep(total, options).await;
    }
    Ok(ExitCode::SUCCESS)
}

pub async fn retry_command(args: RetryArgs, config: &PacerConfig) -> Result<ExitCode> {
    let attempts = match args.attempts {
        Some(n) => Attempts::new(n),
        None => config.retry_attempts(),
    }
    .context("invalid --attempts")?;
    let pause = args
        .interval_ms
        .map(Duration::from_millis)
        .or_else(|| config.retry_interval())
        .filter(|pause| !pause.is_zero());

    let command = &args.command;
    let operation = || process::run(command);
    let outcome = match pause {
        Some(pause) => retry_interval(attempts, pause, operation).await,
        None => retry(attempts, operation).await,
    };

    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            tracing::error!(attempts = attempts.get(), "{err}");
            Ok(ExitCode::from(err.exit_code()))
        }
    }
}

pub async fn wait_command(args: WaitArgs, config: &PacerConfig) -> Result<ExitCode> {
    let logger = TracingLogger;
    let mut options: WaitOptions<'_, CommandError> =
        config.wait_options().with_logger(&logger);
    if let Some(ms) = args.wait_ms {
        options = options.with_wait(Duration::from_millis(ms));
    }
    if let Some(ms) = args.interval_ms {
        options = options.with_interval(Duration::from_millis(ms));
    }
    if let Some(message) = args.message {
        options = options.with_message(message);
    }

    let command = &args.command;
    let outcome = wait_for_condition(
        || async move { process::status(command).await.map(|status| status.success()) },
        options,
    )
    .await;

    match outcome {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(WaitError::Condition(err)) => {
            tracing::error!("{err}");
            Ok(ExitCode::from(err.exit_code()))
        }
        Err(err) => {
            tracing::error!("{err}");
            Ok(ExitCode::FAILURE)
        }
    }
}

pub async fn each_command(args: EachArgs, config: &PacerConfig) -> Result<ExitCode> {
    let execution = if args.sequential {
        Execution::Sequential
    } else {
        config.execution()
    };
    tracing::debug!(
        items = args.items.len(),
        execution = execution.as_str(),
        "Running command per item"
    );

    let command = &args.command;
    let placeholder = args.placeholder.as_str();
    let statuses = async_map(args.items.iter(), execution, |item| async move {
        let argv = process::substitute(command, placeholder, item);
        process::status(&argv).await
    })
    .await?;

    let mut all_ok = true;
    for (item, status) in args.items.iter().zip(&statuses) {
        println!("{item}: {}", describe(*status));
        all_ok &= status.success();
    }
    Ok(if all_ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn describe(status: ExitStatus) -> String {
    match status.code() {
        Some(0) => "ok".to_string(),
        Some(code) => format!("exit {code}"),
        None => status.to_string(),
    }
}

fn sleep_options(args: &SleepArgs, config: &PacerConfig) -> LongSleepOptions {
    let mut options = config.sleep_options();
    if let Some(ms) = args.threshold_ms {
        options = options.with_threshold(Duration::from_millis(ms));
    }
    if let Some(ms) = args.interval_ms {
        options = options.with_interval(Duration::from_millis(ms));
    }
    options
}
