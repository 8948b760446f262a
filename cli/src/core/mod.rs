//! # Parley Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module aggregates the core infrastructure shared by both bots:
//! configuration, error management and message templating.
//!
//! ## Architecture
//!
//! - `config`: Configuration loading, merging, and validation
//! - `error`: Error types and error handling utilities
//! - `templating`: Tera rendering of user-visible message templates
//!
//! ## Usage
//!
//! ```rust
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{ParleyError, Result}; // For error handling
//! use crate::core::templating; // For rendering bot messages
//! ```
//!
pub mod config;
pub mod error;
pub mod templating;
