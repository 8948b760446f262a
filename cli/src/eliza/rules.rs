//! # Responder Rule Set (`eliza::rules`)
//!
//! File: cli/src/eliza/rules.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The responder's behaviour is pure data: an ordered list of rules, each a
//! trigger substring plus one or more response templates, and a list of
//! generic fallback prompts for when nothing matches. The built-in set is the
//! classic Rogerian one; a TOML file can replace it entirely.
//!
//! ## File Format
//!
//! ```toml
//! fallbacks = ["Please tell me more.", "I see."]
//!
//! [[rules]]
//! trigger = "i am"
//! templates = ["Why are you {rest}?", "How long have you been {rest}?"]
//! ```
//!
//! Templates may contain the `{rest}` placeholder, which is replaced by the
//! reflected text following the trigger.
//!
use crate::core::error::{ParleyError, Result};
use anyhow::{anyhow, Context};
use serde::Deserialize;
use std::{fs, path::Path};
use tracing::{debug, info};

/// Placeholder substituted with the reflected remainder of the utterance.
pub const REST_PLACEHOLDER: &str = "{rest}";

/// A single trigger and its response templates.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Rule {
    /// Substring looked for, case-insensitively, in the utterance.
    pub trigger: String,
    /// Alternative replies, used in rotation.
    pub templates: Vec<String>,
}

impl Rule {
    pub fn new(trigger: &str, templates: &[&str]) -> Self {
        Self {
            trigger: trigger.to_string(),
            templates: templates.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Ordered rules plus fallback prompts.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RuleSet {
    pub rules: Vec<Rule>,
    pub fallbacks: Vec<String>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RuleSet {
    /// # Built-in Rules (`builtin`)
    ///
    /// The classic therapist rules, in priority order. Earlier rules win, so
    /// the more specific triggers ("why can't i") come before the general
    /// ones ("i can't").
    pub fn builtin() -> Self {
        let rules = vec![
            Rule::new(
                "i need",
                &[
                    "Why do you need {rest}?",
                    "Would it really help you to get {rest}?",
                    "Are you sure you need {rest}?",
                ],
            ),
            Rule::new(
                "why don't you",
                &[
                    "Do you really think I don't {rest}?",
                    "Perhaps eventually I will {rest}.",
                    "Do you really want me to {rest}?",
                ],
            ),
            Rule::new(
                "why can't i",
                &[
                    "Do you think you should be able to {rest}?",
                    "If you could {rest}, what would you do?",
                    "I don't know -- why can't you {rest}?",
                    "Have you really tried?",
                ],
            ),
            Rule::new(
                "i can't",
                &[
                    "How do you know you can't {rest}?",
                    "Perhaps you could {rest} if you tried.",
                    "What would it take for you to {rest}?",
                ],
            ),
            Rule::new(
                "i am",
                &[
                    "Did you come to me because you are {rest}?",
                    "How long have you been {rest}?",
                    "How do you feel about being {rest}?",
                ],
            ),
            Rule::new(
                "i'm",
                &[
                    "Why are you {rest}?",
                    "How does being {rest} make you feel?",
                    "Do you enjoy being {rest}?",
                ],
            ),
            Rule::new(
                "mother",
                &[
                    "Tell me more about your mother.",
                    "What was your relationship with your mother like?",
                    "How do you feel about your mother?",
                ],
            ),
            Rule::new(
                "hello",
                &[
                    "Hello... I'm glad you could drop by today.",
                    "Hi there... how are you today?",
                    "Hello, how are you feeling today?",
                ],
            ),
        ];
        let fallbacks = [
            "Please tell me more.",
            "Let's change focus a bit... Tell me about your family.",
            "Can you elaborate on that?",
            "I see.",
            "Very interesting.",
            "I see. And what does that tell you?",
            "How does that make you feel?",
            "How do you feel when you say that?",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        Self { rules, fallbacks }
    }

    /// Parses and validates a rule set from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let rule_set: RuleSet =
            toml::from_str(content).context("Failed to parse responder rule set TOML")?;
        rule_set.validate()?;
        Ok(rule_set)
    }

    /// # Load Rule Set (`load`)
    ///
    /// Reads a rule-set file, parses it and validates it.
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading responder rules from: {}", path.display());
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read rule set file: {}", path.display()))?;
        let rule_set = Self::from_toml_str(&content)
            .with_context(|| format!("Invalid rule set file: {}", path.display()))?;
        debug!("Loaded {} responder rules", rule_set.rules.len());
        Ok(rule_set)
    }

    /// Checks that every rule can produce a reply and that a fallback exists.
    pub fn validate(&self) -> Result<()> {
        for (index, rule) in self.rules.iter().enumerate() {
            if rule.trigger.trim().is_empty() {
                return Err(anyhow!(ParleyError::RuleSet(format!(
                    "rule #{} has an empty trigger",
                    index + 1
                ))));
            }
            if rule.templates.is_empty() || rule.templates.iter().any(|t| t.trim().is_empty()) {
                return Err(anyhow!(ParleyError::RuleSet(format!(
                    "rule '{}' needs at least one non-empty template",
                    rule.trigger
                ))));
            }
        }
        if self.fallbacks.is_empty() || self.fallbacks.iter().any(|f| f.trim().is_empty()) {
            return Err(anyhow!(ParleyError::RuleSet(
                "at least one non-empty fallback prompt is required".to_string()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_builtin_is_valid() {
        let rules = RuleSet::builtin();
        assert!(rules.validate().is_ok());
        assert_eq!(rules.rules[0].trigger, "i need");
        assert!(rules.fallbacks.iter().all(|f| !f.contains(REST_PLACEHOLDER)));
    }

    #[test]
    fn test_parse_rule_file() -> Result<()> {
        let content = r#"
            fallbacks = ["Go on."]

            [[rules]]
            trigger = "I am"
            templates = ["Why are you {rest}?"]
        "#;
        let rules = RuleSet::from_toml_str(content)?;
        assert_eq!(rules.rules, vec![Rule::new("I am", &["Why are you {rest}?"])]);
        assert_eq!(rules.fallbacks, vec!["Go on."]);
        Ok(())
    }

    #[test]
    fn test_rejects_empty_trigger() {
        let content = r#"
            fallbacks = ["Go on."]
            [[rules]]
            trigger = "  "
            templates = ["Hm."]
        "#;
        let err = RuleSet::from_toml_str(content).unwrap_err();
        assert!(err.to_string().contains("empty trigger"));
    }

    #[test]
    fn test_rejects_missing_fallbacks() {
        let content = r#"
            fallbacks = []
            [[rules]]
            trigger = "hi"
            templates = ["Hello."]
        "#;
        let err = RuleSet::from_toml_str(content).unwrap_err();
        assert!(err.to_string().contains("fallback"));
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let content = r#"
            fallbacks = ["Go on."]
            weights = [1]
            rules = []
        "#;
        assert!(RuleSet::from_toml_str(content).is_err());
    }

    #[test]
    fn test_load_from_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("rules.toml");
        fs::write(
            &path,
            "fallbacks = [\"Hmm.\"]\n[[rules]]\ntrigger = \"dream\"\ntemplates = [\"What does that dream suggest?\"]\n",
        )?;
        let rules = RuleSet::load(&path)?;
        assert_eq!(rules.rules.len(), 1);
        assert_eq!(rules.rules[0].trigger, "dream");
        Ok(())
    }

    #[test]
    fn test_load_missing_file() {
        let err = RuleSet::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read rule set file"));
    }
}
