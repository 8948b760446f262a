//! # Parley Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Small helpers used by both the pattern responder and the support bot.
//!
//! - **`text`**: Case-insensitive keyword sets and punctuation trimming.
//! - **`rotation`**: Deterministic round-robin choice among alternatives.
//!

/// Round-robin selection kept per named list.
pub mod rotation;
/// Keyword matching and small string helpers.
pub mod text;
