// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Black-box test engine for command-line programs.
//!
//! Discovers `<name>.in[.ext]` fixtures in a directory, runs the program
//! under test once per fixture with the fixture on stdin, and compares the
//! captured stdout/stderr against `<name>.out[.ext]` / `<name>.err[.ext]`.
//!
//! The [`runner`] module is the entry point: build a [`RunConfig`], call
//! [`Runner::prepare`] to validate and discover, then [`Plan::execute`] to
//! run every case and collect a [`RunSummary`].

pub mod compare;
pub mod encoding;
pub mod exec;
pub mod fixture;
pub mod normalize;
pub mod params;
pub mod report;
pub mod runner;

pub use compare::{CaseOutcome, CaseResult, RunSummary, Stream, StreamVerdict};
pub use exec::{available_slots, ExecError, ExecutionResult, Executor};
pub use fixture::{Fixture, FixtureError};
pub use normalize::Normalization;
pub use params::{CommandTemplate, Manifest, ManifestError, ParameterSet, TemplateError};
pub use report::{Paint, Plain, Reporter, Tone};
pub use runner::{Plan, RunConfig, RunError, Runner};
