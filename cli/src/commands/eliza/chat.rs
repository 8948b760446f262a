//! # ELIZA Chat Loop
//!
//! File: cli/src/commands/eliza/chat.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Implements `parley eliza chat`. The loop is generic over its input and
//! output so that tests can drive it with in-memory buffers:
//! 1. Greet.
//! 2. Read a line; skip blank lines.
//! 3. `quit` or `exit` says goodbye and ends the session.
//! 4. Anything else is answered by the `Responder`.
//!
//! End of input ends the session the same way as `quit`.
//!
use crate::common::text::trim_trailing_punctuation;
use crate::core::config::ElizaConfig;
use crate::core::error::Result;
use crate::eliza::responder::Responder;
use anyhow::Context;
use clap::Parser;
use std::io::{self, BufRead, Write};
use tracing::info;

pub const GREETING: &str = "Hello. How are you feeling today?";
pub const FAREWELL: &str = "Goodbye. Take care!";

const EXIT_COMMANDS: &[&str] = &["quit", "exit"];

/// Arguments for `parley eliza chat` (none yet).
#[derive(Parser, Debug)]
pub struct ChatArgs {}

pub fn handle_chat(_args: ChatArgs, settings: &ElizaConfig) -> Result<()> {
    let responder = super::build_responder(settings)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_conversation(&settings.bot_name, responder, stdin.lock(), stdout.lock())
}

/// # Run Conversation (`run_conversation`)
///
/// Runs one ELIZA session over `input` and `output`.
///
/// ## Errors
///
/// Only I/O failures on `input` or `output`.
pub fn run_conversation<R: BufRead, W: Write>(
    bot_name: &str,
    mut responder: Responder,
    input: R,
    mut output: W,
) -> Result<()> {
    info!("Starting ELIZA session");
    writeln!(output, "{}: {}", bot_name, GREETING)?;
    writeln!(output, "(Type 'quit' to end the conversation.)")?;

    let mut lines = input.lines();
    loop {
        write!(output, "You: ")?;
        output.flush()?;
        let Some(line) = lines.next() else {
            writeln!(output)?;
            break;
        };
        let line = line.context("Failed to read from input")?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        if EXIT_COMMANDS.contains(&trim_trailing_punctuation(&text.to_lowercase())) {
            break;
        }
        writeln!(output, "{}: {}", bot_name, responder.respond(text))?;
    }

    writeln!(output, "{}: {}", bot_name, FAREWELL)?;
    info!("ELIZA session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eliza::rules::RuleSet;
    use std::io::Cursor;

    fn converse(script: &str) -> String {
        let mut output = Vec::new();
        run_conversation(
            "ELIZA",
            Responder::new(RuleSet::builtin()),
            Cursor::new(script.to_string()),
            &mut output,
        )
        .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_greets_replies_and_says_goodbye() {
        let transcript = converse("I need a holiday\nquit\n");
        assert!(transcript.starts_with("ELIZA: Hello. How are you feeling today?"));
        assert!(transcript.contains("ELIZA: Why do you need a holiday?"));
        assert!(transcript.trim_end().ends_with("ELIZA: Goodbye. Take care!"));
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let transcript = converse("\n   \nexit\n");
        assert!(!transcript.contains("I didn't catch that"));
        assert_eq!(transcript.matches("ELIZA:").count(), 2);
    }

    #[test]
    fn test_end_of_input_ends_session() {
        let transcript = converse("hello");
        assert!(transcript.contains("ELIZA: Hello... I'm glad you could drop by today."));
        assert!(transcript.contains(FAREWELL));
    }

    #[test]
    fn test_text_after_quit_is_ignored() {
        let transcript = converse("Quit.\nI need cake\n");
        assert!(!transcript.contains("cake"));
    }
}
