//! # Support Bot Messages (`support::messages`)
//!
//! File: cli/src/support/messages.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Every fixed sentence the support bot says is a Tera template held here,
//! so deployments can reword the bot from `[support.messages]` in the
//! configuration without touching code. Any field left out of the
//! configuration keeps its default.
//!
//! Variables available to every template: `bot_name`, `user_name`.
//! Additional per-message variables are listed on each field.
//!
use crate::core::error::{ParleyError, Result};
use crate::core::templating;
use anyhow::bail;
use serde::Deserialize;

/// User-visible message templates of the support bot.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct MessageTemplates {
    /// Opening lines, used in rotation.
    pub greetings: Vec<String>,
    pub ask_name: String,
    pub welcome: String,
    pub welcome_anonymous: String,
    pub hint: String,
    /// Variables: `categories`, `example_id`.
    pub help: String,
    pub farewell: String,
    /// Used in rotation. Variables: `faq_answer` (empty when no FAQ matched).
    pub escalations: Vec<String>,
    /// Variables: `ticket_id`.
    pub ticket_created: String,
    /// Variables: `ticket_id`.
    pub ticket_escalated: String,
    /// Variables: `ticket_id`, `status`, `category`, `created_on`.
    pub ticket_status: String,
    /// Variables: `ticket_id`.
    pub ticket_not_found: String,
    /// Variables: `ticket_id`.
    pub ticket_closed: String,
    /// Variables: `example_id`.
    pub ticket_id_missing: String,
    pub ticket_offer: String,
    pub ticket_offer_declined: String,
    pub no_issue: String,
    pub no_tickets: String,
    pub turn_failed: String,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for MessageTemplates {
    fn default() -> Self {
        Self {
            greetings: strings(&[
                "Hello! I'm {{ bot_name }}, your customer support assistant. How can I help you today?",
                "Hi there! I'm {{ bot_name }}, here to assist you with any questions or issues you might have.",
                "Welcome! I'm {{ bot_name }}, your dedicated support specialist. What can I help you with today?",
                "Good day! I'm {{ bot_name }}, ready to provide you with excellent customer support. How may I assist you?",
            ]),
            ask_name: "What's your name?".to_string(),
            welcome: "Nice to meet you, {{ user_name }}! How can I help you today?".to_string(),
            welcome_anonymous: "How can I help you today?".to_string(),
            hint: "You can type 'help' anytime to see what I can do, or 'quit' to end our conversation."
                .to_string(),
            help: "I'm {{ bot_name }}, your customer support assistant! Here's what I can help you with:

Support categories:
{{ categories }}

Commands:
  help                  Show this help message
  create ticket         Open a support ticket for your last issue
  ticket status <ID>    Check a ticket's status (e.g. {{ example_id }})
  close ticket <ID>     Close a ticket that has been resolved
  my tickets            List the tickets opened in this conversation
  quit                  End the conversation

Tips:
  Be specific about your issue for better assistance.
  For urgent matters, I'll escalate to human support.

How can I assist you today, {{ user_name }}?"
                .to_string(),
            farewell: "Thank you for contacting {{ bot_name }} Support! Have a great day, {{ user_name }}!"
                .to_string(),
            escalations: strings(&[
                "I understand this is important. Let me connect you with a human specialist who can better assist you.{% if faq_answer %} In the meantime: {{ faq_answer }}{% endif %} Type 'create ticket' and I'll flag it for them right away.",
                "This requires specialized attention. I'll transfer you to our expert team right away.{% if faq_answer %} In the meantime: {{ faq_answer }}{% endif %} Type 'create ticket' and I'll flag it for them right away.",
                "For this complex issue, let me get you in touch with one of our senior support representatives.{% if faq_answer %} In the meantime: {{ faq_answer }}{% endif %} Type 'create ticket' and I'll flag it for them right away.",
                "I want to ensure you get the best possible help. Let me escalate this to our specialist team.{% if faq_answer %} In the meantime: {{ faq_answer }}{% endif %} Type 'create ticket' and I'll flag it for them right away.",
            ]),
            ticket_created: "I've created a support ticket for you: {{ ticket_id }}. Our team will review your issue and get back to you within 24 hours."
                .to_string(),
            ticket_escalated: "I've created a priority support ticket for you: {{ ticket_id }}. It has been escalated to a human specialist who will contact you shortly."
                .to_string(),
            ticket_status: "Ticket {{ ticket_id }} status: {{ status }}. Category: {{ category }}. Created on {{ created_on }}."
                .to_string(),
            ticket_not_found: "Ticket {{ ticket_id }} not found. Please check the ticket number."
                .to_string(),
            ticket_closed: "Ticket {{ ticket_id }} is now closed. Glad we could sort it out!"
                .to_string(),
            ticket_id_missing: "Please provide a valid ticket number (e.g., {{ example_id }})."
                .to_string(),
            ticket_offer: "Would you like me to create a support ticket for this issue? (yes/no)"
                .to_string(),
            ticket_offer_declined: "No problem. Is there anything else I can help you with?"
                .to_string(),
            no_issue: "Please describe your issue first, and I'll open a ticket for it."
                .to_string(),
            no_tickets: "You haven't opened any tickets in this conversation.".to_string(),
            turn_failed: "I apologize, but I encountered an error. Please try again or contact human support."
                .to_string(),
        }
    }
}

impl MessageTemplates {
    /// Checks that rotation lists are non-empty and that every template parses.
    pub fn validate(&self) -> Result<()> {
        if self.greetings.is_empty() {
            bail!(ParleyError::Config(
                "support.messages.greetings must not be empty.".to_string()
            ));
        }
        if self.escalations.is_empty() {
            bail!(ParleyError::Config(
                "support.messages.escalations must not be empty.".to_string()
            ));
        }
        for (i, greeting) in self.greetings.iter().enumerate() {
            templating::check_template(&format!("greetings[{i}]"), greeting)?;
        }
        for (i, escalation) in self.escalations.iter().enumerate() {
            templating::check_template(&format!("escalations[{i}]"), escalation)?;
        }
        let singles = [
            ("ask_name", &self.ask_name),
            ("welcome", &self.welcome),
            ("welcome_anonymous", &self.welcome_anonymous),
            ("hint", &self.hint),
            ("help", &self.help),
            ("farewell", &self.farewell),
            ("ticket_created", &self.ticket_created),
            ("ticket_escalated", &self.ticket_escalated),
            ("ticket_status", &self.ticket_status),
            ("ticket_not_found", &self.ticket_not_found),
            ("ticket_closed", &self.ticket_closed),
            ("ticket_id_missing", &self.ticket_id_missing),
            ("ticket_offer", &self.ticket_offer),
            ("ticket_offer_declined", &self.ticket_offer_declined),
            ("no_issue", &self.no_issue),
            ("no_tickets", &self.no_tickets),
            ("turn_failed", &self.turn_failed),
        ];
        for (name, template) in singles {
            templating::check_template(name, template)?;
        }
        Ok(())
    }
}
