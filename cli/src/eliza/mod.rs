//! # Parley Pattern Responder (`eliza`)
//!
//! File: cli/src/eliza/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! A classic ELIZA-style conversational engine: ordered substring triggers,
//! reply templates and pronoun reflection. It is independent of the support
//! bot and shares only the text and rotation helpers from `common`.
//!
//! - `reflection`: the first/second-person swap table and `reflect`.
//! - `rules`: the rule-set data model, its built-in default and TOML loading.
//! - `responder`: `Responder::respond`, the per-utterance matching logic.
//!
//! The interactive loop around it lives in `commands::eliza`.
//!
pub mod reflection;
pub mod responder;
pub mod rules;
