//! # Ticket Tracker (`support::tickets`)
//!
//! File: cli/src/support/tickets.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Keeps the support tickets of one session in memory. Nothing is persisted:
//! tickets live exactly as long as the tracker that owns them.
//!
//! ## Ticket Lifecycle
//!
//! ```text
//!            create (no escalation)          close
//!   (new) ─────────────────────────► Open ──────────► Closed
//!     │                                                  ▲
//!     │ create (escalation policy fires)       close     │
//!     └────────────────────────────► Escalated ─────────┘
//! ```
//!
//! Escalation is decided once, at creation. Nothing leaves `Closed`, and
//! closing a closed ticket is a successful no-op.
//!
//! ## Ticket Ids
//!
//! Ids are `<PREFIX>-<n>`, `n` being a per-tracker counter incremented before
//! each use, so with the defaults the first ticket is `TICKET-1001`. Ids are
//! unique within a tracker; uniqueness across runs is not attempted.
//!
use crate::core::error::{ParleyError, Result};
use crate::support::escalation::EscalationPolicy;
use crate::support::knowledge::Category;
use anyhow::anyhow;
use chrono::{DateTime, Local};
use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, info};

/// Requester recorded when none is given.
pub const DEFAULT_REQUESTER: &str = "Customer";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketStatus {
    Open,
    Escalated,
    Closed,
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            TicketStatus::Open => "Open",
            TicketStatus::Escalated => "Escalated",
            TicketStatus::Closed => "Closed",
        })
    }
}

/// One support request.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub id: String,
    pub category: Category,
    /// The utterance the ticket was opened from.
    pub description: String,
    pub requester: String,
    pub status: TicketStatus,
    pub created_at: DateTime<Local>,
}

/// In-memory ticket collection with id generation.
#[derive(Debug, Clone)]
pub struct TicketTracker {
    policy: EscalationPolicy,
    prefix: String,
    counter: u64,
    start: u64,
    default_requester: String,
    tickets: Vec<Ticket>,
    index: HashMap<String, usize>,
    id_pattern: Regex,
}

impl TicketTracker {
    /// # New Tracker (`new`)
    ///
    /// ## Arguments
    ///
    /// * `policy` - Decides the initial status of every created ticket.
    /// * `prefix` - Id prefix; stored upper-cased. Must be non-empty ASCII alphanumeric.
    /// * `start` - Counter start; the first id uses `start + 1`, so `u64::MAX`
    ///   is rejected.
    pub fn new(policy: EscalationPolicy, prefix: &str, start: u64) -> Result<Self> {
        let prefix = prefix.trim().to_uppercase();
        if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(anyhow!(ParleyError::Config(format!(
                "Ticket prefix '{}' must be non-empty and ASCII alphanumeric.",
                prefix
            ))));
        }
        if start == u64::MAX {
            return Err(anyhow!(ParleyError::Config(format!(
                "Ticket counter start {} leaves no ticket ids.",
                start
            ))));
        }
        let id_pattern = Regex::new(&format!(r"(?i)\b{}-([0-9]+)\b", regex::escape(&prefix)))?;
        Ok(Self {
            policy,
            prefix,
            counter: start,
            start,
            default_requester: DEFAULT_REQUESTER.to_string(),
            tickets: Vec::new(),
            index: HashMap::new(),
            id_pattern,
        })
    }

    /// Sets the requester recorded by `create_ticket`.
    pub fn with_default_requester(mut self, requester: &str) -> Self {
        self.set_default_requester(requester);
        self
    }

    pub fn set_default_requester(&mut self, requester: &str) {
        self.default_requester = requester.to_string();
    }

    /// # Create Ticket (`create_ticket`)
    ///
    /// Opens a ticket for the default requester. See `create_ticket_for`.
    pub fn create_ticket(
        &mut self,
        category: Category,
        description: &str,
    ) -> std::result::Result<Ticket, ParleyError> {
        let requester = self.default_requester.clone();
        self.create_ticket_for(&requester, category, description)
    }

    /// # Create Ticket For Requester (`create_ticket_for`)
    ///
    /// Generates a fresh id, sets the status to `Escalated` when the
    /// escalation policy fires for `description` and `category` (otherwise
    /// `Open`), stores the ticket and returns a copy of it.
    ///
    /// ## Errors
    ///
    /// `ParleyError::TicketIdsExhausted` once the counter reaches `u64::MAX`.
    pub fn create_ticket_for(
        &mut self,
        requester: &str,
        category: Category,
        description: &str,
    ) -> std::result::Result<Ticket, ParleyError> {
        self.counter = self
            .counter
            .checked_add(1)
            .ok_or_else(|| ParleyError::TicketIdsExhausted {
                prefix: self.prefix.clone(),
            })?;
        let id = format!("{}-{}", self.prefix, self.counter);
        let status = if self.policy.should_escalate(description, category) {
            TicketStatus::Escalated
        } else {
            TicketStatus::Open
        };
        let ticket = Ticket {
            id: id.clone(),
            category,
            description: description.to_string(),
            requester: requester.to_string(),
            status,
            created_at: Local::now(),
        };
        self.index.insert(id, self.tickets.len());
        self.tickets.push(ticket.clone());
        info!(
            "Created ticket {} ({}, {}) for {}",
            ticket.id, ticket.category, ticket.status, ticket.requester
        );
        Ok(ticket)
    }

    /// # Get Ticket Status (`get_status`)
    ///
    /// Looks a ticket up by id (case-insensitive).
    ///
    /// ## Errors
    ///
    /// `ParleyError::TicketNotFound` when no ticket with that id was issued.
    pub fn get_status(&self, ticket_id: &str) -> std::result::Result<&Ticket, ParleyError> {
        self.position(ticket_id)
            .map(|i| &self.tickets[i])
            .ok_or_else(|| not_found(ticket_id))
    }

    /// # Close Ticket (`close_ticket`)
    ///
    /// Moves a ticket to `Closed`. Closing an already closed ticket succeeds
    /// without changes.
    ///
    /// ## Errors
    ///
    /// `ParleyError::TicketNotFound` when no ticket with that id was issued.
    pub fn close_ticket(&mut self, ticket_id: &str) -> std::result::Result<(), ParleyError> {
        let i = self.position(ticket_id).ok_or_else(|| not_found(ticket_id))?;
        let ticket = &mut self.tickets[i];
        if ticket.status == TicketStatus::Closed {
            debug!("Ticket {} already closed", ticket.id);
        } else {
            info!("Closing ticket {} (was {})", ticket.id, ticket.status);
            ticket.status = TicketStatus::Closed;
        }
        Ok(())
    }

    /// All tickets in creation order.
    pub fn list_tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    /// # Parse Ticket Id (`parse_ticket_id`)
    ///
    /// Finds the first `<PREFIX>-<digits>` token in free text, matching the
    /// prefix case-insensitively, and returns it in canonical upper-case form.
    pub fn parse_ticket_id(&self, text: &str) -> Option<String> {
        self.id_pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|digits| format!("{}-{}", self.prefix, digits.as_str()))
    }

    /// An id of the form this tracker issues, for help texts.
    pub fn example_id(&self) -> String {
        format!("{}-{}", self.prefix, self.start + 1)
    }

    fn position(&self, ticket_id: &str) -> Option<usize> {
        self.index.get(&ticket_id.trim().to_uppercase()).copied()
    }
}

fn not_found(ticket_id: &str) -> ParleyError {
    ParleyError::TicketNotFound {
        id: ticket_id.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::support::knowledge::KnowledgeBase;
    use std::collections::HashSet;

    fn tracker() -> TicketTracker {
        let policy = EscalationPolicy::new(&KnowledgeBase::builtin().escalation);
        TicketTracker::new(policy, "TICKET", 1000).unwrap()
    }

    #[test]
    fn test_ids_start_after_counter_and_increase() {
        let mut t = tracker();
        let first = t.create_ticket(Category::Billing, "Where is my invoice?").unwrap();
        let second = t.create_ticket(Category::Product, "Is there a guide?").unwrap();
        assert_eq!(first.id, "TICKET-1001");
        assert_eq!(second.id, "TICKET-1002");
        assert_eq!(first.requester, DEFAULT_REQUESTER);
    }

    #[test]
    fn test_ids_are_pairwise_distinct() {
        let mut t = tracker();
        let ids: HashSet<String> = (0..50)
            .map(|i| {
                t.create_ticket(Category::General, &format!("issue {i}"))
                    .unwrap()
                    .id
            })
            .collect();
        assert_eq!(ids.len(), 50);
        assert_eq!(t.list_tickets().len(), 50);
    }

    #[test]
    fn test_urgent_account_ticket_is_escalated() {
        let mut t = tracker();
        let ticket = t
            .create_ticket(Category::Account, "My account is locked, this is urgent!")
            .unwrap();
        assert_eq!(ticket.status, TicketStatus::Escalated);
        assert_eq!(ticket.description, "My account is locked, this is urgent!");
        assert_eq!(t.get_status(&ticket.id).unwrap().status, TicketStatus::Escalated);
    }

    #[test]
    fn test_plain_ticket_is_open() {
        let mut t = tracker();
        let ticket = t
            .create_ticket_for("Sam", Category::Product, "Where is the guide?")
            .unwrap();
        assert_eq!(ticket.status, TicketStatus::Open);
        assert_eq!(ticket.requester, "Sam");
    }

    #[test]
    fn test_get_status_unknown_id() {
        let t = tracker();
        match t.get_status("nonexistent-id") {
            Err(ParleyError::TicketNotFound { id }) => assert_eq!(id, "nonexistent-id"),
            other => panic!("expected TicketNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_get_status_is_case_insensitive() {
        let mut t = tracker();
        t.create_ticket(Category::General, "hi").unwrap();
        assert!(t.get_status(" ticket-1001 ").is_ok());
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut t = tracker();
        let id = t.create_ticket(Category::Technical, "The app crashes").unwrap().id;
        t.close_ticket(&id).unwrap();
        assert_eq!(t.get_status(&id).unwrap().status, TicketStatus::Closed);
        t.close_ticket(&id).unwrap();
        assert_eq!(t.get_status(&id).unwrap().status, TicketStatus::Closed);
    }

    #[test]
    fn test_escalated_ticket_can_be_closed() {
        let mut t = tracker();
        let id = t.create_ticket(Category::Billing, "I want a refund").unwrap().id;
        assert_eq!(t.get_status(&id).unwrap().status, TicketStatus::Escalated);
        t.close_ticket(&id).unwrap();
        assert_eq!(t.get_status(&id).unwrap().status, TicketStatus::Closed);
    }

    #[test]
    fn test_close_unknown_id() {
        let mut t = tracker();
        assert!(matches!(
            t.close_ticket("TICKET-42"),
            Err(ParleyError::TicketNotFound { .. })
        ));
    }

    #[test]
    fn test_parse_ticket_id() {
        let t = tracker();
        assert_eq!(
            t.parse_ticket_id("what's the status of ticket-1001?"),
            Some("TICKET-1001".to_string())
        );
        assert_eq!(t.parse_ticket_id("ticket status please"), None);
        assert_eq!(t.parse_ticket_id("TICKETS-12"), None);
    }

    #[test]
    fn test_custom_prefix() {
        let policy = EscalationPolicy::new(&KnowledgeBase::builtin().escalation);
        let mut t = TicketTracker::new(policy, "sup", 0).unwrap();
        assert_eq!(t.example_id(), "SUP-1");
        assert_eq!(t.create_ticket(Category::General, "x").unwrap().id, "SUP-1");
        assert_eq!(t.parse_ticket_id("close sup-1"), Some("SUP-1".to_string()));
    }

    #[test]
    fn test_parse_ticket_id_ascii_digits_only() {
        let t = tracker();
        assert_eq!(t.parse_ticket_id("TICKET-\u{661}\u{660}\u{660}\u{661}"), None);
        assert_eq!(t.parse_ticket_id("TICKET-1001\u{661}"), None);
    }

    #[test]
    fn test_counter_near_max() {
        let policy = EscalationPolicy::new(&KnowledgeBase::builtin().escalation);
        assert!(TicketTracker::new(policy.clone(), "TICKET", u64::MAX).is_err());

        let mut t = TicketTracker::new(policy, "TICKET", u64::MAX - 1).unwrap();
        assert_eq!(t.example_id(), format!("TICKET-{}", u64::MAX));
        let last = t.create_ticket(Category::General, "last one").unwrap();
        assert_eq!(last.id, format!("TICKET-{}", u64::MAX));
        assert!(matches!(
            t.create_ticket(Category::General, "one too many"),
            Err(ParleyError::TicketIdsExhausted { .. })
        ));
        assert_eq!(t.list_tickets().len(), 1);
    }

    #[test]
    fn test_rejects_bad_prefix() {
        let policy = EscalationPolicy::new(&KnowledgeBase::builtin().escalation);
        assert!(TicketTracker::new(policy.clone(), "", 0).is_err());
        assert!(TicketTracker::new(policy, "T K", 0).is_err());
    }
}
