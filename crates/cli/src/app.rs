// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Drives one run: prepare, report each case as it completes, summarize.

use std::io::{self, IsTerminal, Write};

use test_cmd_engine::{CaseOutcome, CaseResult, Executor, Paint, Reporter, RunConfig, Runner};

use crate::cli::Cli;
use crate::colors::Painter;
use crate::diagnostic::{print_debug, print_error, print_warning};

/// Process exit codes.
pub mod exit_codes {
    /// Every test passed
    pub const SUCCESS: i32 = 0;
    /// At least one test failed
    pub const FAILURE: i32 = 1;
    /// Invalid configuration, nothing was run
    pub const ERROR: i32 = 2;
}

/// Run the tests described by `cli`, writing the report to stdout.
pub async fn run(cli: &Cli) -> i32 {
    let painter = Painter::detect(cli.bw, io::stdout().is_terminal());
    run_with(cli, painter, &mut io::stdout()).await
}

/// Run the tests described by `cli`, writing the report to `out`.
///
/// Diagnostics still go to stderr.
pub async fn run_with<P: Paint, W: Write>(cli: &Cli, painter: P, out: &mut W) -> i32 {
    let config = RunConfig::new(cli.tests_dir.clone(), cli.command.clone())
        .with_manifest(cli.manifest.clone())
        .with_normalization(cli.normalization());

    let plan = match Runner::new(config).prepare() {
        Ok(plan) => plan,
        Err(e) => {
            print_error(e);
            return exit_codes::ERROR;
        }
    };

    if let Some(path) = plan.manifest_path() {
        print_debug(
            cli.verbose,
            format_args!("Loaded parameters from {}", path.display()),
        );
    }
    for name in plan.unmatched_manifest_entries() {
        print_warning(format_args!("No test named '{}' for manifest entry", name));
    }

    let executor = cli
        .slots()
        .map_or_else(Executor::with_available_parallelism, Executor::new);
    let reporter = Reporter::new(painter, cli.diff);

    let header = reporter.header(plan.len(), executor.slots());
    let mut write_error = writeln!(out, "{}", header).err();
    let summary = plan
        .execute(&executor, |case| {
            log_exit(cli.verbose, case);
            if write_error.is_none() {
                write_error = writeln!(out, "{}", reporter.case(case)).err();
            }
        })
        .await;
    if write_error.is_none() {
        write_error = writeln!(out, "{}", reporter.summary(&summary))
            .and_then(|()| out.flush())
            .err();
    }

    if let Some(e) = write_error {
        print_error(format_args!("Failed to write report: {}", e));
        return exit_codes::ERROR;
    }
    if summary.all_passed() {
        exit_codes::SUCCESS
    } else {
        exit_codes::FAILURE
    }
}

fn log_exit(verbose: bool, case: &CaseResult) {
    if let CaseOutcome::Completed { exit_code, .. } = &case.outcome {
        match exit_code {
            Some(code) => {
                print_debug(verbose, format_args!("'{}' exited with {}", case.name, code))
            }
            None => print_debug(verbose, format_args!("'{}' killed by a signal", case.name)),
        }
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
