// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Human-readable rendering of case results and run summaries.
//!
//! Styling is delegated to a [`Paint`] implementation so the engine stays
//! free of terminal concerns; [`Plain`] renders without any styling.

use crate::compare::{CaseOutcome, CaseResult, RunSummary, Stream, StreamVerdict};
use similar::TextDiff;

/// Semantic style of a piece of report text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    /// Test name
    Heading,
    /// Field labels such as `Command:`
    Label,
    /// Stream labels and missing-file notices
    Warn,
    Pass,
    Fail,
    Summary,
    /// Diff line present only in received output
    Added,
    /// Diff line present only in expected output
    Removed,
}

/// Applies a [`Tone`] to text.
pub trait Paint {
    fn paint(&self, text: &str, tone: Tone) -> String;
}

/// No styling at all.
#[derive(Clone, Copy, Debug, Default)]
pub struct Plain;

impl Paint for Plain {
    fn paint(&self, text: &str, _tone: Tone) -> String {
        text.to_string()
    }
}

/// Renders report text for a run.
#[derive(Clone, Debug)]
pub struct Reporter<P> {
    painter: P,
    diff_mode: bool,
}

impl<P: Paint> Reporter<P> {
    pub fn new(painter: P, diff_mode: bool) -> Self {
        Self { painter, diff_mode }
    }

    /// Line announcing the run.
    pub fn header(&self, total: usize, slots: usize) -> String {
        format!("Running {} tests on {} CPUs...\n", total, slots)
    }

    /// Full detail block for one case, one line per `\n`.
    pub fn case(&self, case: &CaseResult) -> String {
        let mut out = Detail::default();
        out.line(self.painter.paint(&case.name, Tone::Heading));
        out.line(format!(
            "{} {}",
            self.painter.paint("Command:", Tone::Label),
            case.command.join(" ")
        ));

        match &case.outcome {
            CaseOutcome::Completed { stdout, stderr, .. } => {
                self.stream(&mut out, Stream::Stdout, stdout);
                self.stream(&mut out, Stream::Stderr, stderr);
            }
            CaseOutcome::Failed(reason) => {
                out.line(self.painter.paint(
                    &format!("Failed to run command: {}", reason),
                    Tone::Warn,
                ));
            }
        }

        if case.passed() {
            out.line(self.painter.paint("Success", Tone::Pass));
        } else {
            out.line(self.painter.paint("Failure", Tone::Fail));
        }
        out.text
    }

    /// Final pass/fail count line.
    pub fn summary(&self, summary: &RunSummary) -> String {
        let text = if summary.all_passed() {
            format!("All {} tests passed.", summary.total)
        } else {
            format!(
                "{} tests passed, {} tests failed.",
                summary.passed,
                summary.failed()
            )
        };
        self.painter.paint(&text, Tone::Summary)
    }

    fn stream(&self, out: &mut Detail, stream: Stream, verdict: &StreamVerdict) {
        let label = stream.label();
        match verdict {
            StreamVerdict::Match => {}
            StreamVerdict::Mismatch { expected, received } if self.diff_mode => {
                out.line(self.painter.paint(&format!("{}:", label), Tone::Warn));
                self.diff(out, label, expected, received);
            }
            StreamVerdict::Mismatch { expected, received } => {
                out.line(self.painter.paint(&format!("Received {}:", label), Tone::Warn));
                out.line(String::from_utf8_lossy(received));
                out.line(self.painter.paint(&format!("Expected {}:", label), Tone::Warn));
                out.line(String::from_utf8_lossy(expected));
            }
            StreamVerdict::MissingExpected { path, received } => {
                out.line(self.painter.paint(&format!("Received {}:", label), Tone::Warn));
                out.line(String::from_utf8_lossy(received));
                out.line(self.painter.paint(
                    &format!("Missing {} file: {}", label, path.display()),
                    Tone::Warn,
                ));
            }
            StreamVerdict::Unreadable { path, error } => {
                out.line(self.painter.paint(
                    &format!("Cannot read {} file {}: {}", label, path.display(), error),
                    Tone::Warn,
                ));
            }
        }
    }

    fn diff(&self, out: &mut Detail, label: &str, expected: &[u8], received: &[u8]) {
        let expected = String::from_utf8_lossy(expected);
        let received = String::from_utf8_lossy(received);
        let text = TextDiff::from_lines(&*expected, &*received)
            .unified_diff()
            .context_radius(3)
            .header(&format!("Expected {}", label), &format!("Received {}", label))
            .to_string();

        if text.is_empty() {
            out.line("(outputs differ only in bytes that are not valid UTF-8)");
            return;
        }
        for line in text.lines() {
            let tone = if line.starts_with("+++") || line.starts_with("---") {
                None
            } else if line.starts_with('+') {
                Some(Tone::Added)
            } else if line.starts_with('-') {
                Some(Tone::Removed)
            } else {
                None
            };
            match tone {
                Some(tone) => out.line(self.painter.paint(line, tone)),
                None => out.line(line),
            }
        }
    }
}

#[derive(Default)]
struct Detail {
    text: String,
}

impl Detail {
    fn line(&mut self, s: impl AsRef<str>) {
        self.text.push_str(s.as_ref());
        self.text.push('\n');
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
