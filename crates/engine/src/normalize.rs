// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Output normalization applied to both captured and expected bytes.

use std::borrow::Cow;

/// Normalization options. Both off means exact byte comparison.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Normalization {
    /// Replace CRLF line endings with LF
    pub to_unix: bool,
    /// Drop trailing spaces and tabs on every line and trailing newlines
    pub rtrim: bool,
}

impl Normalization {
    pub fn new(to_unix: bool, rtrim: bool) -> Self {
        Self { to_unix, rtrim }
    }

    /// Apply the enabled transforms, `to_unix` first.
    pub fn apply<'a>(&self, bytes: &'a [u8]) -> Cow<'a, [u8]> {
        let mut out = Cow::Borrowed(bytes);
        if self.to_unix {
            out = Cow::Owned(to_unix(&out));
        }
        if self.rtrim {
            // Under to_unix a leftover CR is line-ending residue, not content
            out = Cow::Owned(rtrim(&out, self.to_unix));
        }
        out
    }
}

/// Replace CRLF with LF until none is left, so `\r\r\n` ends as `\n`.
pub fn to_unix(bytes: &[u8]) -> Vec<u8> {
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    for &b in bytes {
        if b == b'\n' {
            while out.last() == Some(&b'\r') {
                out.pop();
            }
        }
        out.push(b);
    }
    out
}

/// Strip trailing space and tab from each line, then trailing newlines.
///
/// With `strip_cr`, trailing CRs are stripped along with the whitespace.
pub fn rtrim(bytes: &[u8], strip_cr: bool) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    for (i, line) in bytes.split(|&b| b == b'\n').enumerate() {
        if i > 0 {
            out.push(b'\n');
        }
        let end = line
            .iter()
            .rposition(|&b| !(b == b' ' || b == b'\t' || (strip_cr && b == b'\r')))
            .map_or(0, |pos| pos + 1);
        out.extend_from_slice(&line[..end]);
    }
    while out.last() == Some(&b'\n') {
        out.pop();
    }
    out
}

#[cfg(test)]
#[path = "normalize_tests.rs"]
mod tests;
