// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Run orchestration: validate, discover, bind, then execute in parallel.
//!
//! Everything that can be wrong with the configuration is detected by
//! [`Runner::prepare`] before a single process is launched. Once a [`Plan`]
//! exists, per-case problems only ever fail that case.

use crate::compare::{judge, CaseResult, RunSummary};
use crate::exec::{resolve_program, ExecError, Executor};
use crate::fixture::{discover, Fixture, FixtureError};
use crate::normalize::Normalization;
use crate::params::{
    bind_commands, CommandTemplate, Manifest, ManifestError, TemplateError, MANIFEST_FILE_NAME,
};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration problems; a run with any of these never starts.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("The directory '{}' does not exist.", .0.display())]
    TestsDirMissing(PathBuf),

    #[error(transparent)]
    Command(#[from] ExecError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("Invalid manifest {}: {source}", path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: ManifestError,
    },

    #[error(transparent)]
    Fixture(#[from] FixtureError),
}

/// Inputs for one run.
#[derive(Clone, Debug)]
pub struct RunConfig {
    pub tests_dir: PathBuf,
    /// Program under test followed by its arguments
    pub command: Vec<String>,
    /// Manifest override; defaults to `<tests_dir>/tests.json`
    pub manifest: Option<PathBuf>,
    pub normalization: Normalization,
}

impl RunConfig {
    pub fn new(tests_dir: impl Into<PathBuf>, command: Vec<String>) -> Self {
        Self {
            tests_dir: tests_dir.into(),
            command,
            manifest: None,
            normalization: Normalization::default(),
        }
    }

    pub fn with_manifest(mut self, manifest: Option<PathBuf>) -> Self {
        self.manifest = manifest;
        self
    }

    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.manifest
            .clone()
            .unwrap_or_else(|| self.tests_dir.join(MANIFEST_FILE_NAME))
    }
}

/// Turns a [`RunConfig`] into an executable [`Plan`].
#[derive(Clone, Debug)]
pub struct Runner {
    config: RunConfig,
}

impl Runner {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Validate the configuration, discover fixtures and bind commands.
    pub fn prepare(&self) -> Result<Plan, RunError> {
        let config = &self.config;
        if !config.tests_dir.is_dir() {
            return Err(RunError::TestsDirMissing(config.tests_dir.clone()));
        }

        let template = CommandTemplate::from_segments(config.command.clone())?;
        resolve_program(template.program())?;

        let manifest_path = config.manifest_path();
        let manifest = load_manifest(&manifest_path)?;

        let mut fixtures = discover(&config.tests_dir)?;
        let unmatched = bind_commands(&template, manifest.as_ref(), &mut fixtures);

        Ok(Plan {
            fixtures,
            unmatched,
            manifest_path: manifest.map(|_| manifest_path),
            normalization: config.normalization,
        })
    }
}

fn load_manifest(path: &Path) -> Result<Option<Manifest>, RunError> {
    Manifest::load(path).map_err(|source| RunError::Manifest {
        path: path.to_path_buf(),
        source,
    })
}

/// Fixtures with their final command lines, ready to execute.
#[derive(Clone, Debug)]
pub struct Plan {
    fixtures: Vec<Fixture>,
    unmatched: Vec<String>,
    manifest_path: Option<PathBuf>,
    normalization: Normalization,
}

impl Plan {
    pub fn fixtures(&self) -> &[Fixture] {
        &self.fixtures
    }

    pub fn len(&self) -> usize {
        self.fixtures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixtures.is_empty()
    }

    /// Manifest entries that named no discovered fixture.
    pub fn unmatched_manifest_entries(&self) -> &[String] {
        &self.unmatched
    }

    /// Path of the manifest that was loaded, if any.
    pub fn manifest_path(&self) -> Option<&Path> {
        self.manifest_path.as_deref()
    }

    /// Run every case and report each one, in discovery order.
    ///
    /// All cases are spawned up front; `executor` decides how many run at
    /// once. `on_case` sees results in fixture order regardless of which
    /// child finishes first.
    pub async fn execute<F>(&self, executor: &Executor, mut on_case: F) -> RunSummary
    where
        F: FnMut(&CaseResult),
    {
        let handles: Vec<_> = self
            .fixtures
            .iter()
            .map(|fixture| {
                let executor = executor.clone();
                let fixture = fixture.clone();
                let normalization = self.normalization;
                tokio::spawn(async move { run_case(&executor, &fixture, normalization).await })
            })
            .collect();

        let mut summary = RunSummary::default();
        for (fixture, handle) in self.fixtures.iter().zip(handles) {
            let case = match handle.await {
                Ok(case) => case,
                Err(e) => CaseResult::failed(fixture, format!("Test task aborted: {}", e)),
            };
            summary.record(&case);
            on_case(&case);
        }
        summary
    }
}

async fn run_case(
    executor: &Executor,
    fixture: &Fixture,
    normalization: Normalization,
) -> CaseResult {
    let input = match tokio::fs::read(&fixture.input_path).await {
        Ok(input) => input,
        Err(source) => {
            let err = ExecError::ReadInput {
                path: fixture.input_path.clone(),
                source,
            };
            return CaseResult::failed(fixture, err.to_string());
        }
    };

    match executor.run(&fixture.command, input).await {
        Ok(execution) => judge(fixture, &execution, normalization).await,
        Err(e) => CaseResult::failed(fixture, e.to_string()),
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
