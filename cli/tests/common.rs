//! # Parley CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each test file
//! declares `mod common;` and is compiled as a separate test crate that runs
//! the compiled `parley` binary.
//!
//! Commands built with `parley_in` run inside a temporary directory that
//! holds a `.git` directory (so the project config search stops there) and
//! use that directory as `HOME`, so neither a developer's own configuration
//! nor `PARLEY_CONFIG` can leak into a test.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// # Get Parley Command (`parley_cmd`)
///
/// An `assert_cmd::Command` pointing at the compiled `parley` binary.
///
/// ## Panics
/// Panics if the binary cannot be found via `Command::cargo_bin`.
pub fn parley_cmd() -> Command {
    Command::cargo_bin("parley").expect("Failed to find parley binary for testing")
}

/// Creates an empty sandbox directory marked as a repository root.
pub fn sandbox() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::create_dir(dir.path().join(".git")).expect("Failed to create .git dir");
    dir
}

/// # Sandboxed Parley Command (`parley_in`)
///
/// `parley_cmd()` running in `dir` with `HOME` and `XDG_CONFIG_HOME` pointed
/// into it and `PARLEY_CONFIG` removed.
pub fn parley_in(dir: &Path) -> Command {
    let mut cmd = parley_cmd();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("PARLEY_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}
