// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Child process execution bounded by a shared admission semaphore.

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::sync::Semaphore;

/// Number of processing units on this host (at least 1).
pub fn available_slots() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("Command '{0}' does not exist or is not executable")]
    NotFound(String),

    #[error("Empty command line")]
    EmptyCommand,

    #[error("Failed to read input file {}: {source}", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write to stdin: {0}")]
    Stdin(#[source] std::io::Error),

    #[error("Failed to collect output: {0}")]
    Wait(#[source] std::io::Error),

    #[error("Execution slot pool closed")]
    Closed,
}

/// Everything captured from one run of the program.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExecutionResult {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    /// Exit code, `None` when terminated by a signal. Informational only.
    pub exit_code: Option<i32>,
}

/// Runs commands, never more than `slots` at a time.
#[derive(Clone, Debug)]
pub struct Executor {
    permits: Arc<Semaphore>,
    slots: usize,
}

impl Executor {
    /// Create an executor with `slots` concurrent children (minimum 1).
    pub fn new(slots: usize) -> Self {
        let slots = slots.max(1);
        Self {
            permits: Arc::new(Semaphore::new(slots)),
            slots,
        }
    }

    /// Executor sized to the host's processing units.
    pub fn with_available_parallelism() -> Self {
        Self::new(available_slots())
    }

    pub fn slots(&self) -> usize {
        self.slots
    }

    /// Run `command` with `input` on stdin and collect both output streams.
    ///
    /// Waits for a free slot first; the slot is held until the child has
    /// been reaped. Stdin is written while stdout/stderr are drained so a
    /// chatty child cannot deadlock on a full pipe.
    pub async fn run(
        &self,
        command: &[String],
        input: Vec<u8>,
    ) -> Result<ExecutionResult, ExecError> {
        let (program, args) = command.split_first().ok_or(ExecError::EmptyCommand)?;

        let _permit = Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .map_err(|_| ExecError::Closed)?;

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ExecError::Spawn {
                program: program.clone(),
                source,
            })?;

        let stdin = child.stdin.take();
        let feed = async move {
            let Some(mut stdin) = stdin else {
                return Ok(());
            };
            match stdin.write_all(&input).await {
                // The child may exit without reading its input
                Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
                other => other,
            }
            // stdin dropped here, closing the pipe
        };

        let (fed, output) = tokio::join!(feed, child.wait_with_output());
        let output = output.map_err(ExecError::Wait)?;
        fed.map_err(ExecError::Stdin)?;

        Ok(ExecutionResult {
            stdout: output.stdout,
            stderr: output.stderr,
            exit_code: output.status.code(),
        })
    }
}

/// Check that `program` resolves to an executable file.
///
/// Bare names are searched on `PATH`; anything with a path separator must
/// name an executable file directly.
pub fn resolve_program(program: &str) -> Result<PathBuf, ExecError> {
    which::which(program).map_err(|_| ExecError::NotFound(program.to_string()))
}

#[cfg(test)]
#[path = "exec_tests.rs"]
mod tests;
