// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Command templates and per-fixture argument manifests.
//!
//! A command template may contain one `@` placeholder. The manifest
//! (`tests.json`) maps test display names to flag/value objects; a fixture
//! with an entry gets `flag value flag value ...` spliced in at the
//! placeholder, every other fixture gets the template without it.

use crate::encoding::encode;
use crate::fixture::Fixture;
use serde_json::{Map, Value};
use std::path::Path;
use thiserror::Error;

/// Template segment replaced by manifest arguments
pub const PLACEHOLDER: &str = "@";

/// Default manifest file name inside the tests directory
pub const MANIFEST_FILE_NAME: &str = "tests.json";

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("No command to test")]
    Empty,

    #[error("Only one '@' command-line args substitution marker allowed")]
    MultiplePlaceholders,
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Parse(#[from] serde_json::Error),

    #[error("top level must be a JSON object")]
    NotAnObject,

    #[error("entry '{0}' must be a JSON object of flag names to values")]
    EntryNotAnObject(String),
}

/// The program under test plus its arguments, validated to hold at most
/// one placeholder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandTemplate {
    segments: Vec<String>,
}

impl CommandTemplate {
    /// Build a template from the program and its arguments.
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Result<Self, TemplateError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut segments = vec![program.into()];
        segments.extend(args.into_iter().map(Into::into));
        Self::from_segments(segments)
    }

    /// Build a template from a full argv (program first).
    pub fn from_segments(segments: Vec<String>) -> Result<Self, TemplateError> {
        if segments.is_empty() {
            return Err(TemplateError::Empty);
        }
        let placeholders = segments.iter().filter(|s| *s == PLACEHOLDER).count();
        if placeholders > 1 {
            return Err(TemplateError::MultiplePlaceholders);
        }
        Ok(Self { segments })
    }

    pub fn program(&self) -> &str {
        &self.segments[0]
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn has_placeholder(&self) -> bool {
        self.segments.iter().any(|s| s == PLACEHOLDER)
    }

    /// Produce a command line, splicing `params` in at the placeholder.
    ///
    /// With no parameters the placeholder is simply dropped.
    pub fn bind(&self, params: Option<&ParameterSet>) -> Vec<String> {
        let mut command = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            if segment == PLACEHOLDER {
                if let Some(params) = params {
                    command.extend(params.to_tokens());
                }
            } else {
                command.push(segment.clone());
            }
        }
        command
    }
}

/// Flag/value pairs for one test, in manifest order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParameterSet {
    args: Vec<(String, Value)>,
}

impl ParameterSet {
    pub fn from_object(object: Map<String, Value>) -> Self {
        Self {
            args: object.into_iter().collect(),
        }
    }

    pub fn args(&self) -> &[(String, Value)] {
        &self.args
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Flatten into `[flag, encoded value, flag, encoded value, ...]`.
    pub fn to_tokens(&self) -> Vec<String> {
        self.args
            .iter()
            .flat_map(|(flag, value)| [flag.clone(), encode(value)])
            .collect()
    }
}

/// Parsed `tests.json`: test display name to its parameter set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Manifest {
    entries: Vec<(String, ParameterSet)>,
}

impl Manifest {
    /// Load a manifest file. A missing file is `Ok(None)`.
    pub fn load(path: &Path) -> Result<Option<Self>, ManifestError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Self::parse(&content).map(Some)
    }

    /// Parse manifest JSON text.
    pub fn parse(content: &str) -> Result<Self, ManifestError> {
        let Value::Object(top) = serde_json::from_str::<Value>(content)? else {
            return Err(ManifestError::NotAnObject);
        };

        let mut entries = Vec::with_capacity(top.len());
        for (name, value) in top {
            let Value::Object(object) = value else {
                return Err(ManifestError::EntryNotAnObject(name));
            };
            entries.push((name, ParameterSet::from_object(object)));
        }
        Ok(Self { entries })
    }

    pub fn get(&self, name: &str) -> Option<&ParameterSet> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, params)| params)
    }

    /// Test names in manifest order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Fill in every fixture's command line.
///
/// Returns the manifest entries that matched no fixture, in manifest order.
pub fn bind_commands(
    template: &CommandTemplate,
    manifest: Option<&Manifest>,
    fixtures: &mut [Fixture],
) -> Vec<String> {
    for fixture in fixtures.iter_mut() {
        let params = manifest.and_then(|m| m.get(&fixture.name));
        fixture.command = template.bind(params);
    }

    match manifest {
        Some(manifest) => manifest
            .names()
            .filter(|name| !fixtures.iter().any(|f| f.name == *name))
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    }
}

#[cfg(test)]
#[path = "params_tests.rs"]
mod tests;
