//! # Parley ELIZA Integration Tests
//!
//! File: cli/tests/eliza.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Integration tests for the `parley eliza` command group (`chat`, `reply`).
//!

mod common;
use common::*;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_reply_reflects_pronouns() {
    let dir = sandbox();
    parley_in(dir.path())
        .args(["eliza", "reply", "I need my coffee"])
        .assert()
        .success()
        .stdout("Why do you need your coffee?\n");
}

#[test]
fn test_reply_alias_and_fallback() {
    let dir = sandbox();
    parley_in(dir.path())
        .args(["e", "reply", "the", "weather", "is", "nice"])
        .assert()
        .success()
        .stdout("Please tell me more.\n");
}

#[test]
fn test_chat_session() {
    let dir = sandbox();
    parley_in(dir.path())
        .args(["eliza", "chat"])
        .write_stdin("I'm tired.\n\nmy mother called\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "ELIZA: Hello. How are you feeling today?",
        ))
        .stdout(predicate::str::contains("ELIZA: Why are you tired?"))
        .stdout(predicate::str::contains("ELIZA: Tell me more about your mother."))
        .stdout(predicate::str::contains("ELIZA: Goodbye. Take care!"));
}

#[test]
fn test_chat_ends_at_end_of_input() {
    let dir = sandbox();
    parley_in(dir.path())
        .args(["eliza", "chat"])
        .write_stdin("hello")
        .assert()
        .success()
        .stdout(predicate::str::contains("Goodbye. Take care!"));
}

#[test]
fn test_custom_rules_file() {
    let dir = sandbox();
    let rules = dir.path().join("rules.toml");
    fs::write(
        &rules,
        r#"
fallbacks = ["Hmm."]

[[rules]]
trigger = "i feel"
templates = ["Why do you feel {rest}?"]
"#,
    )
    .unwrap();
    fs::write(
        dir.path().join(".parley.toml"),
        format!("[eliza]\nrules_file = {:?}\n", rules.to_string_lossy()),
    )
    .unwrap();

    parley_in(dir.path())
        .args(["eliza", "reply", "I feel lost"])
        .assert()
        .success()
        .stdout("Why do you feel lost?\n");
}

#[test]
fn test_invalid_rules_file_fails() {
    let dir = sandbox();
    let rules = dir.path().join("rules.toml");
    fs::write(&rules, "fallbacks = []\nrules = []\n").unwrap();
    let config = dir.path().join("parley.toml");
    fs::write(
        &config,
        format!("[eliza]\nrules_file = {:?}\n", rules.to_string_lossy()),
    )
    .unwrap();

    parley_in(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["eliza", "reply", "hi"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid rule set file"));
}
