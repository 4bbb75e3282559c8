// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

//! Shared helpers for binary-level tests.

use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Create a tests directory holding `files` as `(name, content)` pairs.
pub fn fixtures(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (name, content) in files {
        write(dir.path(), name, content);
    }
    dir
}

pub fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

/// `test-cmd` invocation with color and env overrides cleared.
pub fn test_cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(env!("CARGO_BIN_EXE_test-cmd"));
    cmd.env_remove("TEST_CMD_BW").env_remove("TEST_CMD_JOBS");
    cmd
}
