//! # Parley Error Types
//!
//! File: cli/src/core/error.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module defines the error types used throughout Parley. Domain failures
//! that callers need to tell apart (an unknown ticket id, a malformed knowledge
//! base) are variants of `ParleyError`; everything else travels as an
//! `anyhow::Error` with context attached.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `ParleyError`: A custom error enum using `thiserror` for specific error types
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!
//! The error types cover:
//! - Configuration errors
//! - Knowledge-base and rule-set validation errors
//! - Ticket lookups for ids that were never issued
//! - Message template rendering errors
//!
//! ## Examples
//!
//! ```rust
//! // Core ticket operations return the typed error directly
//! match tracker.get_status("TICKET-9999") {
//!     Ok(ticket) => println!("{}", ticket.status),
//!     Err(ParleyError::TicketNotFound { id }) => println!("No ticket {id}"),
//!     Err(e) => return Err(e.into()),
//! }
//!
//! // Application code adds context using anyhow
//! let content = fs::read_to_string(&path)
//!     .with_context(|| format!("Failed to read file: {}", path.display()))?;
//! ```
//!
//! No error inside a conversation turn is fatal: the conversation loops render
//! failures as a friendly message and carry on.
//!
use thiserror::Error;

/// Custom error type for the Parley application.
#[derive(Error, Debug)]
pub enum ParleyError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid knowledge base: {0}")]
    KnowledgeBase(String),

    #[error("Invalid responder rule set: {0}")]
    RuleSet(String),

    #[error("Ticket '{id}' not found.")]
    TicketNotFound { id: String },

    #[error("No ticket ids left for prefix '{prefix}'.")]
    TicketIdsExhausted { prefix: String },

    #[error("Template rendering error: {source}")]
    Template {
        #[from]
        source: tera::Error,
    },
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let config_err = ParleyError::Config("Missing setting 'foo'".to_string());
        assert_eq!(
            config_err.to_string(),
            "Configuration error: Missing setting 'foo'"
        );

        let not_found = ParleyError::TicketNotFound {
            id: "TICKET-1234".into(),
        };
        assert_eq!(not_found.to_string(), "Ticket 'TICKET-1234' not found.");

        let kb_err = ParleyError::KnowledgeBase("category 'billing' has no keywords".into());
        assert_eq!(
            kb_err.to_string(),
            "Invalid knowledge base: category 'billing' has no keywords"
        );
    }

    #[test]
    fn test_downcast_from_anyhow() {
        let err: anyhow::Error = ParleyError::TicketNotFound {
            id: "TICKET-1".into(),
        }
        .into();
        assert!(matches!(
            err.downcast_ref::<ParleyError>(),
            Some(ParleyError::TicketNotFound { .. })
        ));
    }
}
