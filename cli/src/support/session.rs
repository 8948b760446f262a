//! # Support Session (`support::session`)
//!
//! File: cli/src/support/session.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! A `SupportSession` is one conversation with the support bot. It owns
//! everything with conversation lifetime (history, user profile, ticket
//! tracker, rotation state) and turns each input line into a `Reply`.
//! It does no I/O; `commands::support::chat` drives it from a terminal.
//!
//! ## Turn Routing
//!
//! Inputs are matched in this order:
//! 1. A pending ticket offer is accepted (`yes`, `y`, `create ticket`) or
//!    declined (`no`, `n`); anything else drops the offer and is routed below.
//! 2. Exit commands (`quit`, `exit`, `bye`, `goodbye`) end the session.
//! 3. `help`, `commands`, `what can you do` show the help text.
//! 4. `create ticket` opens a ticket for the last issue.
//! 5. `my tickets` / `list tickets` lists this session's tickets.
//! 6. `close ticket <ID>` closes a ticket.
//! 7. Input mentioning "ticket" together with "status" or a digit is a status query.
//! 8. Anything else is an issue: classify, check escalation, look up the FAQ,
//!    and answer with the escalation message, the FAQ answer, or a canned
//!    category response, in that order of preference.
//!
//! After an issue turn, once the history is longer than `offer_ticket_after`,
//! the bot offers to open a ticket, unless the input mentioned tickets or the
//! user already declined an offer in this session.
//!
use crate::common::rotation::Rotation;
use crate::common::text::trim_trailing_punctuation;
use crate::core::config::SupportConfig;
use crate::core::error::{ParleyError, Result};
use crate::core::templating;
use crate::support::classifier::Classifier;
use crate::support::escalation::EscalationPolicy;
use crate::support::faq::FaqStore;
use crate::support::knowledge::{Category, KnowledgeBase};
use crate::support::messages::MessageTemplates;
use crate::support::tickets::{TicketStatus, TicketTracker};
use chrono::{DateTime, Local};
use std::collections::HashMap;
use tracing::{debug, info};

const EXIT_COMMANDS: &[&str] = &["quit", "exit", "bye", "goodbye"];
const HELP_COMMANDS: &[&str] = &["help", "commands", "what can you do"];
const CREATE_TICKET_COMMANDS: &[&str] = &["create ticket", "create a ticket", "open a ticket"];
const LIST_TICKET_COMMANDS: &[&str] = &["my tickets", "list tickets"];
const ACCEPT_OFFER: &[&str] = &["yes", "y", "yes please", "sure", "create ticket"];
const DECLINE_OFFER: &[&str] = &["no", "n", "no thanks"];

/// One user input and the bot's answer to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub user: String,
    pub bot: String,
    pub at: DateTime<Local>,
}

/// What the session knows about the person it is talking to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub name: String,
}

/// The bot's answer to one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// True after an exit command.
    pub end_session: bool,
}

impl Reply {
    fn say(text: String) -> Self {
        Self {
            text,
            end_session: false,
        }
    }

    fn end(text: String) -> Self {
        Self {
            text,
            end_session: true,
        }
    }
}

#[derive(Debug, Clone)]
struct Issue {
    category: Category,
    text: String,
}

/// State and logic of one support conversation.
#[derive(Debug)]
pub struct SupportSession {
    bot_name: String,
    user: UserProfile,
    kb: KnowledgeBase,
    classifier: Classifier,
    faqs: FaqStore,
    escalation: EscalationPolicy,
    tracker: TicketTracker,
    messages: MessageTemplates,
    offer_ticket_after: usize,
    history: Vec<Exchange>,
    last_issue: Option<Issue>,
    pending_offer: Option<Issue>,
    offers_declined: bool,
    rotation: Rotation,
}

impl SupportSession {
    /// # New Session (`new`)
    ///
    /// Builds the classifier, FAQ store, escalation policy and ticket tracker
    /// from `kb`, and takes names, ticket numbering and messages from `settings`.
    pub fn new(settings: &SupportConfig, kb: KnowledgeBase) -> Result<Self> {
        let escalation = EscalationPolicy::new(&kb.escalation);
        let tracker = TicketTracker::new(
            escalation.clone(),
            &settings.ticket_prefix,
            settings.ticket_start,
        )?
        .with_default_requester(&settings.default_user_name);
        Ok(Self {
            bot_name: settings.bot_name.clone(),
            user: UserProfile {
                name: settings.default_user_name.clone(),
            },
            classifier: Classifier::new(&kb),
            faqs: FaqStore::new(&kb),
            escalation,
            tracker,
            messages: settings.messages.clone(),
            offer_ticket_after: settings.offer_ticket_after,
            history: Vec::new(),
            last_issue: None,
            pending_offer: None,
            offers_declined: false,
            rotation: Rotation::new(),
            kb,
        })
    }

    pub fn bot_name(&self) -> &str {
        &self.bot_name
    }

    pub fn user(&self) -> &UserProfile {
        &self.user
    }

    pub fn history(&self) -> &[Exchange] {
        &self.history
    }

    pub fn tracker(&self) -> &TicketTracker {
        &self.tracker
    }

    /// The next opening line, in rotation.
    pub fn greeting(&mut self) -> Result<String> {
        let template = self
            .rotation
            .pick("greetings", &self.messages.greetings)
            .cloned()
            .unwrap_or_default();
        self.render(&template, &[])
    }

    pub fn ask_name_prompt(&self) -> Result<String> {
        self.render(&self.messages.ask_name, &[])
    }

    pub fn hint(&self) -> Result<String> {
        self.render(&self.messages.hint, &[])
    }

    /// # Set User Name (`set_user_name`)
    ///
    /// Records the user's name and returns the welcome line. A blank name
    /// keeps the default and yields the anonymous welcome.
    pub fn set_user_name(&mut self, name: &str) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            return self.render(&self.messages.welcome_anonymous, &[]);
        }
        self.user.name = name.to_string();
        self.tracker.set_default_requester(name);
        info!("Support session user is now '{}'", name);
        self.render(&self.messages.welcome, &[])
    }

    /// The apology shown when a turn fails. Never fails itself.
    pub fn turn_failed_message(&self) -> String {
        self.render(&self.messages.turn_failed, &[])
            .unwrap_or_else(|_| self.messages.turn_failed.clone())
    }

    /// # Handle Turn (`handle`)
    ///
    /// Routes one input line (see the module docs) and records the exchange
    /// in the history. Blank input gets a prompt and is not recorded.
    ///
    /// ## Errors
    ///
    /// Only template rendering can fail; unknown ticket ids and unmatched
    /// input are answered, not returned as errors.
    pub fn handle(&mut self, input: &str) -> Result<Reply> {
        let text = input.trim();
        if text.is_empty() {
            return Ok(Reply::say(self.render(&self.messages.welcome_anonymous, &[])?));
        }
        let lowered = text.to_lowercase();
        let command = trim_trailing_punctuation(&lowered).to_string();

        let (mut reply, issue_turn) = match self.pending_offer.take() {
            Some(issue) if ACCEPT_OFFER.contains(&command.as_str()) => {
                (Reply::say(self.open_ticket(&issue)?), false)
            }
            Some(_) if DECLINE_OFFER.contains(&command.as_str()) => {
                debug!("Ticket offer declined; no further offers this session");
                self.offers_declined = true;
                (
                    Reply::say(self.render(&self.messages.ticket_offer_declined, &[])?),
                    false,
                )
            }
            _ => self.route(text, &lowered, &command)?,
        };

        self.history.push(Exchange {
            user: text.to_string(),
            bot: reply.text.clone(),
            at: Local::now(),
        });

        if issue_turn
            && !self.offers_declined
            && self.history.len() > self.offer_ticket_after
            && !lowered.contains("ticket")
        {
            if let Some(issue) = self.last_issue.clone() {
                reply.text.push('\n');
                reply.text.push_str(&self.render(&self.messages.ticket_offer, &[])?);
                self.pending_offer = Some(issue);
            }
        }

        Ok(reply)
    }

    /// Returns the reply and whether the input was treated as a new issue.
    fn route(&mut self, text: &str, lowered: &str, command: &str) -> Result<(Reply, bool)> {
        if EXIT_COMMANDS.contains(&command) {
            return Ok((Reply::end(self.render(&self.messages.farewell, &[])?), false));
        }
        if HELP_COMMANDS.contains(&command) {
            return Ok((Reply::say(self.help_text()?), false));
        }
        if CREATE_TICKET_COMMANDS.contains(&command) {
            let text = match self.last_issue.clone() {
                Some(issue) => self.open_ticket(&issue)?,
                None => self.render(&self.messages.no_issue, &[])?,
            };
            return Ok((Reply::say(text), false));
        }
        if LIST_TICKET_COMMANDS.contains(&command) {
            return Ok((Reply::say(self.list_text()?), false));
        }
        if command.starts_with("close ticket") {
            return Ok((Reply::say(self.close_text(text)?), false));
        }
        if lowered.contains("ticket")
            && (lowered.contains("status") || text.chars().any(|c| c.is_ascii_digit()))
        {
            return Ok((Reply::say(self.status_text(text)?), false));
        }
        Ok((Reply::say(self.answer_issue(text)?), true))
    }

    fn answer_issue(&mut self, text: &str) -> Result<String> {
        let category = self.classifier.classify(text);
        let escalate = self.escalation.should_escalate(text, category);
        let faq_answer = self.faqs.lookup(category, text).map(str::to_string);
        debug!(
            "Issue turn: category={}, escalate={}, faq_hit={}",
            category,
            escalate,
            faq_answer.is_some()
        );
        self.last_issue = Some(Issue {
            category,
            text: text.to_string(),
        });

        if escalate {
            let template = self
                .rotation
                .pick("escalations", &self.messages.escalations)
                .cloned()
                .unwrap_or_default();
            return self.render(&template, &[("faq_answer", faq_answer.unwrap_or_default())]);
        }
        if let Some(answer) = faq_answer {
            return Ok(answer);
        }

        let responses = self
            .kb
            .profile(category)
            .map(|p| p.responses.as_slice())
            .filter(|r| !r.is_empty())
            .or_else(|| {
                self.kb
                    .profile(Category::General)
                    .map(|p| p.responses.as_slice())
            })
            .unwrap_or(&[]);
        match self
            .rotation
            .pick(&format!("responses:{}", category.name()), responses)
        {
            Some(response) => Ok(response.clone()),
            None => self.render(&self.messages.welcome_anonymous, &[]),
        }
    }

    fn open_ticket(&mut self, issue: &Issue) -> Result<String> {
        let ticket = self.tracker.create_ticket(issue.category, &issue.text)?;
        self.last_issue = None;
        let template = match ticket.status {
            TicketStatus::Escalated => &self.messages.ticket_escalated,
            _ => &self.messages.ticket_created,
        };
        self.render(template, &[("ticket_id", ticket.id)])
    }

    fn status_text(&self, text: &str) -> Result<String> {
        let Some(id) = self.tracker.parse_ticket_id(text) else {
            return self.render(
                &self.messages.ticket_id_missing,
                &[("example_id", self.tracker.example_id())],
            );
        };
        match self.tracker.get_status(&id) {
            Ok(ticket) => self.render(
                &self.messages.ticket_status,
                &[
                    ("ticket_id", ticket.id.clone()),
                    ("status", ticket.status.to_string()),
                    ("category", ticket.category.to_string()),
                    ("created_on", ticket.created_at.format("%Y-%m-%d").to_string()),
                ],
            ),
            Err(ParleyError::TicketNotFound { id }) => {
                debug!("Status requested for unknown ticket {}", id);
                self.render(&self.messages.ticket_not_found, &[("ticket_id", id)])
            }
            Err(e) => Err(e.into()),
        }
    }

    fn close_text(&mut self, text: &str) -> Result<String> {
        let Some(id) = self.tracker.parse_ticket_id(text) else {
            return self.render(
                &self.messages.ticket_id_missing,
                &[("example_id", self.tracker.example_id())],
            );
        };
        match self.tracker.close_ticket(&id) {
            Ok(()) => self.render(&self.messages.ticket_closed, &[("ticket_id", id)]),
            Err(ParleyError::TicketNotFound { id }) => {
                self.render(&self.messages.ticket_not_found, &[("ticket_id", id)])
            }
            Err(e) => Err(e.into()),
        }
    }

    fn list_text(&self) -> Result<String> {
        let tickets = self.tracker.list_tickets();
        if tickets.is_empty() {
            return self.render(&self.messages.no_tickets, &[]);
        }
        let lines: Vec<String> = tickets
            .iter()
            .map(|t| {
                format!(
                    "  {:<14} {:<10} {:<10} {}",
                    t.id, t.status, t.category, t.description
                )
            })
            .collect();
        Ok(format!("Your tickets:\n{}", lines.join("\n")))
    }

    fn help_text(&self) -> Result<String> {
        let categories = self
            .kb
            .categories
            .iter()
            .filter(|p| p.name != Category::General)
            .map(|p| format!("  - {}: {}", p.name, p.keywords.join(", ")))
            .collect::<Vec<_>>()
            .join("\n");
        self.render(
            &self.messages.help,
            &[
                ("categories", categories),
                ("example_id", self.tracker.example_id()),
            ],
        )
    }

    fn render(&self, template: &str, extra: &[(&str, String)]) -> Result<String> {
        let mut context = HashMap::new();
        context.insert("bot_name".to_string(), self.bot_name.clone());
        context.insert("user_name".to_string(), self.user.name.clone());
        for (key, value) in extra {
            context.insert(key.to_string(), value.clone());
        }
        templating::render_message(template, &context)
    }
}
