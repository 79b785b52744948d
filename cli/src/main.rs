//! Pacer CLI - drive shell commands with Pacer's timing primitives.
//!
//! ```text
//! main() -> load config -> init_tracing() -> run::{sleep, retry, wait, each}
//! ```
//!
//! Everything runs on a single-threaded runtime: the primitives interleave
//! child processes at their await points and never need worker threads.
//! Logs go to stderr so stdout stays free for `each` results.

mod cli;
mod process;
mod run;

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use pacer_config::PacerConfig;

use crate::cli::{Cli, Command};

const DEFAULT_LOG_LEVEL: &str = "info";

fn init_tracing(default_level: Option<&str>) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level.unwrap_or(DEFAULT_LOG_LEVEL)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(io::stderr().is_terminal()),
        )
        .with(env_filter)
        .init();
}

fn load_config(cli: &Cli) -> Result<PacerConfig> {
    let loaded = match &cli.config {
        Some(path) => PacerConfig::load_from(path),
        None => PacerConfig::load(),
    };
    Ok(loaded.context("failed to load config")?.unwrap_or_default())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            init_tracing(None);
            return Err(err);
        }
    };
    init_tracing(config.log_level().as_deref());

    match cli.command {
        Command::Sleep(args) => run::sleep(args, &config).await,
        Command::Retry(args) => run::retry_command(args, &config).await,
        Command::Wait(args) => run::wait_command(args, &config).await,
        Command::Each(args) => run::each_command(args, &config).await,
    }
}
