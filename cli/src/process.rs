//! Child-process runs used as retry operations, poll conditions and map transforms.

use std::io;
use std::process::{ExitStatus, Stdio};

use thiserror::Error;
use tokio::process::Command;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("failed to spawn `{program}`: {source}")]
    Spawn { program: String, source: io::Error },
    #[error("`{program}` exited with {status}")]
    Exit { program: String, status: ExitStatus },
}

impl CommandError {
    /// Process exit code to report for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            CommandError::Exit { status, .. } => status
                .code()
                .and_then(|code| u8::try_from(code).ok())
                .filter(|code| *code != 0)
                .unwrap_or(1),
            // Matches the shell's "command not found".
            CommandError::Empty | CommandError::Spawn { .. } => 127,
        }
    }
}

/// Run `argv` to completion with inherited stdio and return its exit status.
///
/// A non-zero exit is not an error here; only a failure to start is.
pub async fn status(argv: &[String]) -> Result<ExitStatus, CommandError> {
    let (program, args) = argv.split_first().ok_or(CommandError::Empty)?;
    tracing::debug!(program = %program, ?args, "Spawning command");
    Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .status()
        .await
        .map_err(|source| CommandError::Spawn {
            program: program.clone(),
            source,
        })
}

/// Run `argv` and treat a non-zero exit as failure.
pub async fn run(argv: &[String]) -> Result<(), CommandError> {
    let status = status(argv).await?;
    if status.success() {
        Ok(())
    } else {
        Err(CommandError::Exit {
            program: argv.first().cloned().unwrap_or_default(),
            status,
        })
    }
}

/// Replace every occurrence of `placeholder` in each argument with `item`.
///
/// If no argument contains the placeholder, `item` is appended as a final argument.
pub fn substitute(argv: &[String], placeholder: &str, item: &str) -> Vec<String> {
    if placeholder.is_empty() || !argv.iter().any(|arg| arg.contains(placeholder)) {
        let mut out = argv.to_vec();
        out.push(item.to_string());
        return out;
    }
    argv.iter()
        .map(|arg| arg.replace(placeholder, item))
        .collect()
}
