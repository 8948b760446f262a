//! # Parley Command Modules
//!
//! File: cli/src/commands/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module aggregates the top-level command groups of the Parley CLI and
//! makes them accessible to the main entry point (`main.rs`).
//!
//! ## Command Groups
//!
//! - `eliza`: the pattern-matching conversational bot
//! - `support`: the customer-support bot and its inspection tools
//!
//! Each group defines its own arguments structure and a `handle_*` function
//! that dispatches to its subcommands. Subcommands are declared inside their
//! group's `mod.rs`, not here.
//!

/// Command group for the ELIZA-style bot. Includes `chat` and `reply`.
pub mod eliza;
/// Command group for the customer-support bot. Includes `chat`, `classify` and `kb`.
pub mod support;
