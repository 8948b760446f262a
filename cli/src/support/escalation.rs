//! # Escalation Policy (`support::escalation`)
//!
//! File: cli/src/support/escalation.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Decides whether a request needs a human. The decision is a pure function
//! of the utterance and its category:
//! - any urgency keyword ("urgent", "asap", "speak to someone", ...) escalates;
//! - a Billing request escalates when it also mentions a refund or dispute.
//!
//! Adding an urgency keyword to an utterance can only turn the answer from
//! `false` to `true`, never the other way round.
//!
use crate::common::text::KeywordSet;
use crate::support::knowledge::{Category, EscalationKeywords};

/// Keyword-based hand-off predicate.
#[derive(Debug, Clone)]
pub struct EscalationPolicy {
    urgency: KeywordSet,
    billing_dispute: KeywordSet,
}

impl EscalationPolicy {
    pub fn new(keywords: &EscalationKeywords) -> Self {
        Self {
            urgency: KeywordSet::new(&keywords.urgency),
            billing_dispute: KeywordSet::new(&keywords.billing_dispute),
        }
    }

    /// # Should Escalate (`should_escalate`)
    ///
    /// True when `utterance` carries an urgency keyword, or when `category`
    /// is Billing and `utterance` carries a refund/dispute keyword.
    pub fn should_escalate(&self, utterance: &str, category: Category) -> bool {
        let lowered = utterance.to_lowercase();
        self.urgency.matches_any(&lowered)
            || (category == Category::Billing && self.billing_dispute.matches_any(&lowered))
    }
}
