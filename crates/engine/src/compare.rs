// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Verdicts for captured output against expected fixture files.

use crate::exec::ExecutionResult;
use crate::fixture::Fixture;
use crate::normalize::Normalization;
use std::path::{Path, PathBuf};

/// Which output stream a verdict is about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

impl Stream {
    pub fn label(self) -> &'static str {
        match self {
            Stream::Stdout => "STDOUT",
            Stream::Stderr => "STDERR",
        }
    }
}

/// Outcome of comparing one stream. Byte payloads are post-normalization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StreamVerdict {
    Match,
    Mismatch {
        expected: Vec<u8>,
        received: Vec<u8>,
    },
    /// No expected file, yet the stream produced output
    MissingExpected {
        path: PathBuf,
        received: Vec<u8>,
    },
    /// The expected file exists but could not be read
    Unreadable {
        path: PathBuf,
        error: String,
    },
}

impl StreamVerdict {
    pub fn passed(&self) -> bool {
        matches!(self, StreamVerdict::Match)
    }
}

/// What happened to one test case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CaseOutcome {
    /// The program ran; exit code is kept for diagnostics only
    Completed {
        stdout: StreamVerdict,
        stderr: StreamVerdict,
        exit_code: Option<i32>,
    },
    /// The program could not be run at all
    Failed(String),
}

/// Verdict and context for one fixture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseResult {
    pub name: String,
    pub command: Vec<String>,
    pub outcome: CaseOutcome,
}

impl CaseResult {
    pub fn failed(fixture: &Fixture, reason: impl Into<String>) -> Self {
        Self {
            name: fixture.name.clone(),
            command: fixture.command.clone(),
            outcome: CaseOutcome::Failed(reason.into()),
        }
    }

    pub fn passed(&self) -> bool {
        match &self.outcome {
            CaseOutcome::Completed { stdout, stderr, .. } => stdout.passed() && stderr.passed(),
            CaseOutcome::Failed(_) => false,
        }
    }
}

/// Aggregate pass count for a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
}

impl RunSummary {
    pub fn record(&mut self, case: &CaseResult) {
        self.total += 1;
        if case.passed() {
            self.passed += 1;
        }
    }

    pub fn failed(&self) -> usize {
        self.total - self.passed
    }

    pub fn all_passed(&self) -> bool {
        self.passed == self.total
    }
}

/// Compare one stream.
///
/// `expected` is `None` when the expected file does not exist, in which
/// case the stream passes only if it is empty after normalization.
pub fn compare_stream(
    received: &[u8],
    expected: Option<&[u8]>,
    expected_path: &Path,
    normalization: Normalization,
) -> StreamVerdict {
    let received = normalization.apply(received);
    match expected {
        Some(expected) => {
            let expected = normalization.apply(expected);
            if expected == received {
                StreamVerdict::Match
            } else {
                StreamVerdict::Mismatch {
                    expected: expected.into_owned(),
                    received: received.into_owned(),
                }
            }
        }
        None if received.is_empty() => StreamVerdict::Match,
        None => StreamVerdict::MissingExpected {
            path: expected_path.to_path_buf(),
            received: received.into_owned(),
        },
    }
}

/// Read an expected fixture file; `Ok(None)` when there is no such file.
pub async fn load_expected(path: &Path) -> std::io::Result<Option<Vec<u8>>> {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_file() => tokio::fs::read(path).await.map(Some),
        Ok(_) => Ok(None),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

async fn judge_stream(
    received: &[u8],
    expected_path: &Path,
    normalization: Normalization,
) -> StreamVerdict {
    match load_expected(expected_path).await {
        Ok(expected) => {
            compare_stream(received, expected.as_deref(), expected_path, normalization)
        }
        Err(e) => StreamVerdict::Unreadable {
            path: expected_path.to_path_buf(),
            error: e.to_string(),
        },
    }
}

/// Judge a finished execution against the fixture's expected files.
pub async fn judge(
    fixture: &Fixture,
    execution: &ExecutionResult,
    normalization: Normalization,
) -> CaseResult {
    let stdout = judge_stream(
        &execution.stdout,
        &fixture.expected_stdout_path,
        normalization,
    )
    .await;
    let stderr = judge_stream(
        &execution.stderr,
        &fixture.expected_stderr_path,
        normalization,
    )
    .await;

    CaseResult {
        name: fixture.name.clone(),
        command: fixture.command.clone(),
        outcome: CaseOutcome::Completed {
            stdout,
            stderr,
            exit_code: execution.exit_code,
        },
    }
}

#[cfg(test)]
#[path = "compare_tests.rs"]
mod tests;
