//! # Support Chat Loop
//!
//! File: cli/src/commands/support/chat.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Implements `parley support chat`. The loop owns the terminal side of the
//! conversation; all decisions are made by `SupportSession`.
//!
//! Session flow:
//! 1. Print a greeting (rotating through the configured greetings).
//! 2. Ask for the user's name unless `--name` was given.
//! 3. Print the hint line.
//! 4. Hand each non-blank line to the session until it ends the session or
//!    input runs out.
//!
//! A turn that fails is logged and answered with an apology; the session
//! carries on.
//!
use crate::core::config::SupportConfig;
use crate::core::error::Result;
use crate::support::session::SupportSession;
use anyhow::Context;
use clap::Parser;
use std::io::{self, BufRead, Write};
use tracing::{info, warn};

#[derive(Parser, Debug)]
pub struct ChatArgs {
    /// Your name; skips the name prompt.
    #[arg(short, long)]
    pub name: Option<String>,
}

pub fn handle_chat(args: ChatArgs, settings: &SupportConfig) -> Result<()> {
    let kb = super::load_knowledge(settings)?;
    let session = SupportSession::new(settings, kb)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(session, args.name.as_deref(), stdin.lock(), stdout.lock())
}

/// # Run Session (`run_session`)
///
/// Drives `session` over `input` and `output`.
///
/// ## Arguments
///
/// * `session` - A fresh session.
/// * `name` - The user's name, if already known.
/// * `input` / `output` - Line source and sink.
///
/// ## Errors
///
/// Only I/O failures and failures before the first turn (e.g. a greeting
/// template that does not render). Turn failures are reported in-band.
pub fn run_session<R: BufRead, W: Write>(
    mut session: SupportSession,
    name: Option<&str>,
    input: R,
    mut output: W,
) -> Result<()> {
    let bot = session.bot_name().to_string();
    info!("Starting support session with {}", bot);
    writeln!(output, "{}: {}", bot, session.greeting()?)?;

    let mut lines = input.lines();
    let name = match name {
        Some(name) => name.to_string(),
        None => {
            write!(output, "{}: {} ", bot, session.ask_name_prompt()?)?;
            output.flush()?;
            match lines.next() {
                Some(line) => line.context("Failed to read from input")?,
                None => String::new(),
            }
        }
    };
    writeln!(output, "{}: {}", bot, session.set_user_name(&name)?)?;
    writeln!(output, "{}: {}", bot, session.hint()?)?;

    loop {
        write!(output, "{}: ", session.user().name)?;
        output.flush()?;
        let Some(line) = lines.next() else {
            writeln!(output)?;
            break;
        };
        let line = line.context("Failed to read from input")?;
        if line.trim().is_empty() {
            continue;
        }
        match session.handle(&line) {
            Ok(reply) => {
                writeln!(output, "{}: {}", bot, reply.text)?;
                if reply.end_session {
                    break;
                }
            }
            Err(e) => {
                warn!("Support turn failed: {:#}", e);
                writeln!(output, "{}: {}", bot, session.turn_failed_message())?;
            }
        }
    }

    info!(
        "Support session ended after {} turns with {} tickets",
        session.history().len(),
        session.tracker().list_tickets().len()
    );
    Ok(())
}
