// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line argument parsing.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::Parser;
use test_cmd_engine::Normalization;

/// Black-box functional tests for command-line programs.
///
/// Runs CMD once per `<name>.in[.ext]` file in TESTS_DIR with that file on
/// stdin, and compares stdout/stderr against `<name>.out[.ext]` and
/// `<name>.err[.ext]`. An `@` argument is replaced with the arguments listed
/// for the test in `tests.json`.
#[derive(Parser, Debug, Clone)]
#[command(name = "test-cmd", version)]
pub struct Cli {
    /// Black & white output
    #[arg(short, long, env = "TEST_CMD_BW")]
    pub bw: bool,

    /// Show a unified diff instead of received/expected output
    #[arg(short, long)]
    pub diff: bool,

    /// Convert CRLF line endings to LF before comparing
    #[arg(short = 'u', long)]
    pub to_unix: bool,

    /// Strip trailing whitespace and trailing newlines before comparing
    #[arg(short = 't', long)]
    pub rtrim: bool,

    /// Maximum number of tests running at once (default: number of CPUs)
    #[arg(short, long, value_name = "N", env = "TEST_CMD_JOBS")]
    pub jobs: Option<NonZeroUsize>,

    /// Parameter manifest (default: TESTS_DIR/tests.json)
    #[arg(short, long, value_name = "PATH")]
    pub manifest: Option<PathBuf>,

    /// Print diagnostic messages to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Directory containing the test fixtures
    #[arg(value_name = "TESTS_DIR")]
    pub tests_dir: PathBuf,

    /// Program under test, followed by its arguments
    #[arg(
        value_name = "CMD",
        required = true,
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

impl Cli {
    pub fn normalization(&self) -> Normalization {
        Normalization::new(self.to_unix, self.rtrim)
    }

    pub fn slots(&self) -> Option<usize> {
        self.jobs.map(NonZeroUsize::get)
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
