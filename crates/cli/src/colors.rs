// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! ANSI styling for report output.

use test_cmd_engine::{Paint, Tone};

pub const BOLD: &str = "\x1b[1m";
pub const UNDERLINE: &str = "\x1b[4m";
pub const RED: &str = "\x1b[91m";
pub const GREEN: &str = "\x1b[92m";
pub const YELLOW: &str = "\x1b[93m";
pub const BLUE: &str = "\x1b[94m";
pub const RESET: &str = "\x1b[0m";

/// Paints report tones with ANSI escape sequences.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ansi;

impl Ansi {
    fn style(tone: Tone) -> &'static str {
        match tone {
            Tone::Heading => UNDERLINE,
            Tone::Label => BOLD,
            Tone::Warn => YELLOW,
            Tone::Pass | Tone::Added => GREEN,
            Tone::Fail | Tone::Removed => RED,
            Tone::Summary => BLUE,
        }
    }
}

impl Paint for Ansi {
    fn paint(&self, text: &str, tone: Tone) -> String {
        format!("{}{}{}", Self::style(tone), text, RESET)
    }
}

/// Either [`Ansi`] or no styling, chosen at startup.
#[derive(Clone, Copy, Debug)]
pub enum Painter {
    Color,
    Plain,
}

impl Painter {
    /// Color only when asked for and stdout is a terminal.
    pub fn detect(bw: bool, stdout_is_terminal: bool) -> Self {
        if !bw && stdout_is_terminal {
            Painter::Color
        } else {
            Painter::Plain
        }
    }
}

impl Paint for Painter {
    fn paint(&self, text: &str, tone: Tone) -> String {
        match self {
            Painter::Color => Ansi.paint(text, tone),
            Painter::Plain => text.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "colors_tests.rs"]
mod tests;
