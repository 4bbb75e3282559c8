// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line front end for the `test-cmd` black-box test runner.
//!
//! Parses flags, picks a painter for the report and maps the run outcome to
//! a process exit code. Discovery, execution and comparison live in
//! [`test_cmd_engine`].

pub mod app;
pub mod cli;
pub mod colors;
pub mod diagnostic;
