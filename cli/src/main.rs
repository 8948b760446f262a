//! # Parley Main Entry Point
//!
//! File: cli/src/main.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This file serves as the main entry point for the Parley CLI application.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Loading the configuration once for the selected command
//! - Routing execution to appropriate command handlers
//!
//! ## Examples
//!
//! ```bash
//! # Get help
//! parley --help
//!
//! # Talk to the support bot with debug logging on stderr
//! parley -vv support chat
//!
//! # Use a specific configuration file
//! parley --config ./parley.toml eliza chat
//! ```
//!
//! Command processing flow:
//! 1. Parse command-line args via Clap
//! 2. Configure logging based on verbosity level
//! 3. Load configuration
//! 4. Route to appropriate command handler
//! 5. Format and display any errors that occur
//!
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Command groups (eliza, support)
mod common; // Shared text and rotation helpers
mod core; // Core infrastructure (errors, config, templating)
mod eliza; // Pattern-matching responder
mod support; // Customer-support bot

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "parley",
    about = "Parley: terminal chatbots (ELIZA-style responder and customer-support assistant)",
    long_about = "Talk to a classic pattern-matching ELIZA bot, or to a keyword-driven\n\
                  customer-support assistant with FAQ answers, escalation and tickets.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Configuration file to use instead of the user and project files.
    #[arg(long, global = true, env = "PARLEY_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Enum defining all available top-level commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Chat with the ELIZA-style pattern responder.
    #[command(alias = "e")]
    Eliza(commands::eliza::ElizaArgs),
    /// Chat with the customer-support assistant.
    #[command(alias = "s")]
    Support(commands::support::SupportArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = crate::core::config::load_config(cli.config.as_deref()).and_then(|config| {
        match cli.command {
            Commands::Eliza(args) => commands::eliza::handle_eliza(args, &config),
            Commands::Support(args) => commands::support::handle_support(args, &config),
        }
    });

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
