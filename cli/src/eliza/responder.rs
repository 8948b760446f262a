//! # Pattern Responder (`eliza::responder`)
//!
//! File: cli/src/eliza/responder.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The responder maps one utterance to one reply:
//! 1. Rules are tried in declared order; the first whose trigger occurs in the
//!    utterance as whole words (case-insensitively, apostrophes optional) wins.
//! 2. The text after the trigger, minus trailing punctuation, is reflected
//!    (`eliza::reflection`) and substituted for `{rest}` in the template.
//! 3. When no rule matches, a generic fallback prompt is returned.
//!
//! Templates and fallbacks are chosen by round-robin (`common::rotation`),
//! so a given sequence of inputs always produces the same conversation.
//!
//! ## Examples
//!
//! ```rust
//! let rules = RuleSet {
//!     rules: vec![Rule::new("I am", &["Why are you {rest}?"])],
//!     fallbacks: vec!["Go on.".into()],
//! };
//! let mut responder = Responder::new(rules);
//! assert_eq!(responder.respond("I am sad"), "Why are you sad?");
//! ```
//!
use crate::common::rotation::Rotation;
use crate::common::text::{trigger_regex, trim_trailing_punctuation};
use crate::eliza::reflection::reflect;
use crate::eliza::rules::{RuleSet, REST_PLACEHOLDER};
use regex::Regex;
use tracing::{debug, warn};

/// Reply to blank input.
pub const EMPTY_INPUT_REPLY: &str = "I didn't catch that. Could you please repeat?";

const FALLBACK_KEY: &str = "fallback";

/// Rule-driven reply generator. Holds the rotation state, so one instance
/// corresponds to one conversation.
#[derive(Debug, Clone)]
pub struct Responder {
    rule_set: RuleSet,
    /// Compiled trigger of each rule, by rule index.
    triggers: Vec<Option<Regex>>,
    rotation: Rotation,
}

impl Responder {
    pub fn new(rule_set: RuleSet) -> Self {
        let triggers = rule_set
            .rules
            .iter()
            .map(|rule| match trigger_regex(&rule.trigger) {
                Ok(re) => Some(re),
                Err(e) => {
                    warn!("Skipping rule '{}': {}", rule.trigger, e);
                    None
                }
            })
            .collect();
        Self {
            rule_set,
            triggers,
            rotation: Rotation::new(),
        }
    }

    /// # Respond (`respond`)
    ///
    /// Produces the reply to `utterance`. Never fails: unmatched input gets a
    /// fallback prompt and blank input gets `EMPTY_INPUT_REPLY`.
    ///
    /// A rule whose trigger ends the utterance (nothing left for `{rest}`) can
    /// only answer with a template that has no placeholder; if it has none,
    /// matching continues with the next rule.
    pub fn respond(&mut self, utterance: &str) -> String {
        let text = utterance.trim();
        if text.is_empty() {
            return EMPTY_INPUT_REPLY.to_string();
        }

        let rules = self.rule_set.rules.iter().zip(&self.triggers);
        for (index, (rule, trigger)) in rules.enumerate() {
            let Some(found) = trigger.as_ref().and_then(|re| re.find(text)) else {
                continue;
            };
            let rest = trim_trailing_punctuation(text[found.end()..].trim());
            let reflected = reflect(rest);

            let eligible: Vec<&String> = rule
                .templates
                .iter()
                .filter(|t| !reflected.is_empty() || !t.contains(REST_PLACEHOLDER))
                .collect();
            let Some(template) = self.rotation.pick(&format!("rule:{index}"), &eligible) else {
                debug!(
                    "Rule '{}' matched but has no template for empty remainder",
                    rule.trigger
                );
                continue;
            };

            debug!("Responder rule '{}' matched", rule.trigger);
            return template.replace(REST_PLACEHOLDER, &reflected);
        }

        debug!("No responder rule matched; using fallback prompt");
        self.rotation
            .pick(FALLBACK_KEY, &self.rule_set.fallbacks)
            .cloned()
            .unwrap_or_else(|| "Please tell me more.".to_string())
    }
}
