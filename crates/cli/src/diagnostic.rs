// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Diagnostic output helpers for consistent error/warning formatting.
//!
//! Everything goes to stderr so it never mixes with the test report.
//! Colors are used only when stderr is a terminal.

use std::io::{self, IsTerminal, Write};

use crate::colors::{RESET, YELLOW};

const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";

/// Print an error message to stderr.
///
/// Displays in red when stderr is a terminal, plain text otherwise.
pub fn print_error(msg: impl std::fmt::Display) {
    let is_tty = io::stderr().is_terminal();
    write_error(&mut io::stderr(), msg, is_tty);
}

fn write_error<W: Write>(writer: &mut W, msg: impl std::fmt::Display, is_terminal: bool) {
    write_tagged(writer, "Error", RED, msg, is_terminal);
}

/// Print a warning message to stderr.
///
/// Displays in yellow when stderr is a terminal, plain text otherwise.
pub fn print_warning(msg: impl std::fmt::Display) {
    let is_tty = io::stderr().is_terminal();
    write_warning(&mut io::stderr(), msg, is_tty);
}

fn write_warning<W: Write>(writer: &mut W, msg: impl std::fmt::Display, is_terminal: bool) {
    write_tagged(writer, "Warning", YELLOW, msg, is_terminal);
}

/// Print a debug message to stderr, only when `verbose` is set.
pub fn print_debug(verbose: bool, msg: impl std::fmt::Display) {
    if verbose {
        let is_tty = io::stderr().is_terminal();
        write_debug(&mut io::stderr(), msg, is_tty);
    }
}

fn write_debug<W: Write>(writer: &mut W, msg: impl std::fmt::Display, is_terminal: bool) {
    write_tagged(writer, "Debug", DIM, msg, is_terminal);
}

fn write_tagged<W: Write>(
    writer: &mut W,
    tag: &str,
    color: &str,
    msg: impl std::fmt::Display,
    is_terminal: bool,
) {
    if is_terminal {
        let _ = writeln!(writer, "{}{}: {}{}", color, tag, msg, RESET);
    } else {
        let _ = writeln!(writer, "{}: {}", tag, msg);
    }
}

#[cfg(test)]
#[path = "diagnostic_tests.rs"]
mod tests;
