//! # Parley Customer Support Bot (`support`)
//!
//! File: cli/src/support/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! A keyword-driven customer-support assistant. An utterance is classified
//! into a category, checked against the escalation policy and answered from
//! the category's FAQ entries or canned responses; tickets track requests
//! that need follow-up.
//!
//! ## Architecture
//!
//! ```text
//!                   ┌──────────────┐
//!   utterance ────► │  Classifier  │──► Category
//!                   └──────────────┘        │
//!          ┌────────────────┬───────────────┤
//!          ▼                ▼               ▼
//!   EscalationPolicy    FaqStore      TicketTracker
//!          └────────────────┴───────────────┘
//!                           │
//!                    SupportSession ──► Reply
//! ```
//!
//! - `knowledge`: categories, keywords, FAQs, escalation lists (built-in or TOML)
//! - `classifier`, `faq`, `escalation`: pure functions of the knowledge base
//! - `tickets`: the in-memory ticket collection
//! - `messages`: configurable message templates
//! - `session`: per-conversation state and turn routing
//!
pub mod classifier;
pub mod escalation;
pub mod faq;
pub mod knowledge;
pub mod messages;
pub mod session;
pub mod tickets;
