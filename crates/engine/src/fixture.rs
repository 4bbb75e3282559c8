// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Fixture discovery.
//!
//! An input fixture is any file named `<base>.in` or `<base>.in.<ext>`.
//! Its expected outputs live next to it as `<base>.out[.ext]` and
//! `<base>.err[.ext]`; those files are optional and only looked at when the
//! case is compared.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Extension marking a file as test input
pub const INPUT_MARKER: &str = ".in";

/// Extension of the expected-stdout fixture
pub const STDOUT_MARKER: &str = ".out";

/// Extension of the expected-stderr fixture
pub const STDERR_MARKER: &str = ".err";

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Failed to read tests directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed fixture name '{0}': missing '.in' marker extension")]
    MalformedName(String),

    #[error("Duplicate test name '{name}' (from '{first}' and '{second}')")]
    Duplicate {
        name: String,
        first: String,
        second: String,
    },
}

/// The two halves of an input file name: `<base>.in<aux_ext>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixtureName {
    /// Everything before the `.in` marker
    pub base: String,
    /// Whatever followed the marker, leading dot included (may be empty)
    pub aux_ext: String,
}

impl FixtureName {
    /// Split an input file name into base and auxiliary extension.
    pub fn parse(file_name: &str) -> Result<Self, FixtureError> {
        split_input_name(file_name)
            .ok_or_else(|| FixtureError::MalformedName(file_name.to_string()))
    }

    /// Human-readable test name: the base with dashes turned into spaces.
    pub fn display_name(&self) -> String {
        self.base.replace('-', " ")
    }

    pub fn stdout_file_name(&self) -> String {
        format!("{}{}{}", self.base, STDOUT_MARKER, self.aux_ext)
    }

    pub fn stderr_file_name(&self) -> String {
        format!("{}{}{}", self.base, STDERR_MARKER, self.aux_ext)
    }
}

/// One test case: an input file and where its expected outputs would be.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fixture {
    pub name: String,
    pub input_path: PathBuf,
    pub expected_stdout_path: PathBuf,
    pub expected_stderr_path: PathBuf,
    /// Final command line, filled in by the parameter binder
    pub command: Vec<String>,
}

impl Fixture {
    /// Build a fixture from an input file name inside `dir`.
    pub fn from_input_file(dir: &Path, file_name: &str) -> Result<Self, FixtureError> {
        let parts = FixtureName::parse(file_name)?;
        Ok(Self {
            name: parts.display_name(),
            input_path: dir.join(file_name),
            expected_stdout_path: dir.join(parts.stdout_file_name()),
            expected_stderr_path: dir.join(parts.stderr_file_name()),
            command: Vec::new(),
        })
    }
}

/// Whether `file_name` follows the input fixture naming convention.
pub fn is_input_file(file_name: &str) -> bool {
    split_input_name(file_name).is_some()
}

/// Find every input fixture in `dir`, ordered by file name.
pub fn discover(dir: &Path) -> Result<Vec<Fixture>, FixtureError> {
    let read_dir_err = |source: std::io::Error| FixtureError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut file_names = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_dir_err)? {
        let entry = entry.map_err(read_dir_err)?;
        // Non-UTF-8 names can never carry a usable test name
        let Some(file_name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if is_input_file(&file_name) && entry.path().is_file() {
            file_names.push(file_name);
        }
    }
    file_names.sort();

    let mut seen: HashMap<String, String> = HashMap::new();
    let mut fixtures = Vec::with_capacity(file_names.len());
    for file_name in file_names {
        let fixture = Fixture::from_input_file(dir, &file_name)?;
        if let Some(first) = seen.insert(fixture.name.clone(), file_name.clone()) {
            return Err(FixtureError::Duplicate {
                name: fixture.name,
                first,
                second: file_name,
            });
        }
        fixtures.push(fixture);
    }

    Ok(fixtures)
}

fn split_input_name(file_name: &str) -> Option<FixtureName> {
    let (root, ext) = split_ext(file_name);
    let (base, marker) = split_ext(root);

    if marker == INPUT_MARKER {
        return Some(FixtureName {
            base: base.to_string(),
            aux_ext: ext.to_string(),
        });
    }
    if ext == INPUT_MARKER {
        return Some(FixtureName {
            base: root.to_string(),
            aux_ext: String::new(),
        });
    }
    None
}

/// Split off the last extension, dot included. Leading dots belong to the
/// stem, so `.in` has no extension.
fn split_ext(name: &str) -> (&str, &str) {
    let leading = name.len() - name.trim_start_matches('.').len();
    match name[leading..].rfind('.') {
        Some(idx) => name.split_at(leading + idx),
        None => (name, ""),
    }
}

#[cfg(test)]
#[path = "fixture_tests.rs"]
mod tests;
