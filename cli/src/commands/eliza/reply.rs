//! # ELIZA Single Reply
//!
//! File: cli/src/commands/eliza/reply.rs
//! Author: Christi Mahu
//!
//! Implements `parley eliza reply <TEXT>...`: the words are joined with
//! single spaces and the bot's reply is printed on stdout.
//!
use crate::core::config::ElizaConfig;
use crate::core::error::Result;
use clap::Parser;
use tracing::debug;

#[derive(Parser, Debug)]
pub struct ReplyArgs {
    /// The message to reply to.
    #[arg(required = true)]
    pub text: Vec<String>,
}

pub fn handle_reply(args: ReplyArgs, settings: &ElizaConfig) -> Result<()> {
    let mut responder = super::build_responder(settings)?;
    let message = args.text.join(" ");
    debug!("Replying to: {}", message);
    println!("{}", responder.respond(&message));
    Ok(())
}
