//! # Parley ELIZA Commands
//!
//! File: cli/src/commands/eliza/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The `parley eliza` command group: talk to the pattern-matching bot.
//!
//! ## Subcommands
//!
//! - `chat`: interactive session on stdin/stdout
//! - `reply <TEXT>...`: a single reply, handy for scripts
//!
//! ## Examples
//!
//! ```bash
//! parley eliza chat
//! parley e reply I need a holiday
//! ```
//!
use crate::core::config::{Config, ElizaConfig};
use crate::core::error::Result;
use crate::eliza::responder::Responder;
use crate::eliza::rules::RuleSet;
use clap::{Parser, Subcommand};
use std::path::Path;
use tracing::debug;

/// Contains the handler and the conversation loop for `parley eliza chat`.
pub mod chat;
/// Contains the handler for `parley eliza reply`.
mod reply;

/// # ELIZA Command Group Arguments (`ElizaArgs`)
#[derive(Parser, Debug)]
pub struct ElizaArgs {
    #[command(subcommand)]
    command: ElizaCommand,
}

#[derive(Subcommand, Debug)]
enum ElizaCommand {
    /// Start an interactive conversation.
    Chat(chat::ChatArgs),
    /// Print the bot's reply to a single message.
    Reply(reply::ReplyArgs),
}

/// # Handle ELIZA Command (`handle_eliza`)
///
/// Dispatches to the selected subcommand.
///
/// ## Arguments
///
/// * `args` - The parsed `ElizaArgs`.
/// * `config` - The loaded configuration; only the `[eliza]` section is used.
pub fn handle_eliza(args: ElizaArgs, config: &Config) -> Result<()> {
    match args.command {
        ElizaCommand::Chat(args) => chat::handle_chat(args, &config.eliza)?,
        ElizaCommand::Reply(args) => reply::handle_reply(args, &config.eliza)?,
    }
    Ok(())
}

/// Builds a responder from the configured rule-set file, or the built-in rules.
fn build_responder(settings: &ElizaConfig) -> Result<Responder> {
    let rule_set = match &settings.rules_file {
        Some(path) => RuleSet::load(Path::new(path))?,
        None => {
            debug!("No rule set file configured; using built-in rules");
            RuleSet::builtin()
        }
    };
    Ok(Responder::new(rule_set))
}
