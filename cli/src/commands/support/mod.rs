//! # Parley Support Commands
//!
//! File: cli/src/commands/support/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The `parley support` command group: the customer-support bot and tools to
//! inspect how it sees a request.
//!
//! ## Subcommands
//!
//! - `chat [--name <NAME>]`: interactive support session
//! - `classify <TEXT>...`: category, escalation decision and FAQ answer
//! - `kb [--category <CAT>]`: dump the knowledge base in priority order
//!
//! ## Examples
//!
//! ```bash
//! parley support chat --name Dana
//! parley s classify "My account is locked, this is urgent!"
//! parley s kb --category billing
//! ```
//!
use crate::core::config::{Config, SupportConfig};
use crate::core::error::Result;
use crate::support::knowledge::KnowledgeBase;
use clap::{Parser, Subcommand};

/// Contains the handler and the conversation loop for `parley support chat`.
pub mod chat;
/// Contains the handler for `parley support classify`.
mod classify;
/// Contains the handler for `parley support kb`.
mod kb;

/// # Support Command Group Arguments (`SupportArgs`)
#[derive(Parser, Debug)]
pub struct SupportArgs {
    #[command(subcommand)]
    command: SupportCommand,
}

#[derive(Subcommand, Debug)]
enum SupportCommand {
    /// Start an interactive support conversation.
    Chat(chat::ChatArgs),
    /// Show how a message would be categorised and answered.
    Classify(classify::ClassifyArgs),
    /// List categories, keywords and FAQ entries.
    Kb(kb::KbArgs),
}

/// # Handle Support Command (`handle_support`)
///
/// Dispatches to the selected subcommand.
///
/// ## Arguments
///
/// * `args` - The parsed `SupportArgs`.
/// * `config` - The loaded configuration; only the `[support]` section is used.
pub fn handle_support(args: SupportArgs, config: &Config) -> Result<()> {
    match args.command {
        SupportCommand::Chat(args) => chat::handle_chat(args, &config.support)?,
        SupportCommand::Classify(args) => classify::handle_classify(args, &config.support)?,
        SupportCommand::Kb(args) => kb::handle_kb(args, &config.support)?,
    }
    Ok(())
}

fn load_knowledge(settings: &SupportConfig) -> Result<KnowledgeBase> {
    KnowledgeBase::load_or_builtin(settings.knowledge_file.as_deref())
}
