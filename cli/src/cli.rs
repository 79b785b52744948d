//! Command-line surface.
//!
//! Every timing flag is optional: unset flags fall back to the config file,
//! and from there to the primitives' built-in defaults.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "pacer", version, about = "Sleep, retry, poll and fan out shell commands")]
pub struct Cli {
    /// Config file to use instead of $PACER_CONFIG or ~/.pacer/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sleep for MS milliseconds, re-checking the clock on long waits.
    Sleep(SleepArgs),
    /// Run a command until it succeeds, up to N attempts.
    Retry(RetryArgs),
    /// Poll a command until it succeeds or the time budget runs out.
    Wait(WaitArgs),
    /// Run a command once per item, concurrently unless --sequential.
    Each(EachArgs),
}

#[derive(Debug, Args)]
pub struct SleepArgs {
    /// Total sleep in milliseconds.
    pub ms: u64,
    /// Sleeps at or above this length are split into intervals.
    #[arg(long)]
    pub threshold_ms: Option<u64>,
    /// Clock re-check interval for long sleeps.
    #[arg(long)]
    pub interval_ms: Option<u64>,
    /// Log a progress line on every interval.
    #[arg(long)]
    pub progress: bool,
}

#[derive(Debug, Args)]
pub struct RetryArgs {
    /// Maximum number of runs, including the first.
    #[arg(long, short = 'n')]
    pub attempts: Option<u32>,
    /// Pause between failed runs.
    #[arg(long)]
    pub interval_ms: Option<u64>,
    /// Command and arguments.
    #[arg(last = true, required = true, value_name = "CMD")]
    pub command: Vec<String>,
}

#[derive(Debug, Args)]
pub struct WaitArgs {
    /// Total time budget.
    #[arg(long)]
    pub wait_ms: Option<u64>,
    /// Pause between polls.
    #[arg(long)]
    pub interval_ms: Option<u64>,
    /// Error message to report on timeout.
    #[arg(long)]
    pub message: Option<String>,
    /// Command and arguments.
    #[arg(last = true, required = true, value_name = "CMD")]
    pub command: Vec<String>,
}

#[derive(Debug, Args)]
pub struct EachArgs {
    /// Items, comma separated.
    #[arg(long, value_delimiter = ',', required = true)]
    pub items: Vec<String>,
    /// Run one item at a time, in order.
    #[arg(long)]
    pub sequential: bool,
    /// Token in the command replaced by the current item.
    #[arg(long, default_value = "{}")]
    pub placeholder: String,
    /// Command and arguments.
    #[arg(last = true, required = true, value_name = "CMD")]
    pub command: Vec<String>,
}
