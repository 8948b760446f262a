//! # Support Knowledge Base (`support::knowledge`)
//!
//! File: cli/src/support/knowledge.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The knowledge base is the immutable configuration from which the
//! classifier, the FAQ store and the escalation policy are built:
//! - the fixed category set and, per category, its trigger keywords,
//!   canned responses and FAQ entries;
//! - the urgency and billing-dispute keyword lists.
//!
//! Category declaration order is the classifier's priority order.
//!
//! ## Architecture
//!
//! `KnowledgeBase::builtin()` provides the default data. A TOML file with the
//! same shape can replace it (`support.knowledge_file` in the configuration):
//!
//! ```toml
//! [escalation]
//! urgency = ["urgent", "asap"]
//! billing_dispute = ["refund", "dispute"]
//!
//! [[categories]]
//! name = "account"
//! keywords = ["account", "login", "password"]
//! responses = ["I can help you with account-related issues."]
//!
//! [[categories.faqs]]
//! question = "How do I reset my password?"
//! keywords = ["reset", "password", "forgot"]
//! answer = "Go to the login page and click 'Forgot Password'."
//! ```
//!
//! Every loaded knowledge base is validated: all five categories present
//! exactly once, no empty keyword lists, no blank keywords or answers.
//!
use crate::core::error::{ParleyError, Result};
use anyhow::{anyhow, Context};
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::{fs, path::Path};
use tracing::{debug, info};

/// The fixed set of support categories.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Account,
    Billing,
    Technical,
    Product,
    General,
}

impl Category {
    /// All categories in the built-in priority order.
    pub const ALL: [Category; 5] = [
        Category::Account,
        Category::Billing,
        Category::Technical,
        Category::Product,
        Category::General,
    ];

    /// Lowercase identifier, as used in files and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Category::Account => "account",
            Category::Billing => "billing",
            Category::Technical => "technical",
            Category::Product => "product",
            Category::General => "general",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Account => "Account",
            Category::Billing => "Billing",
            Category::Technical => "Technical",
            Category::Product => "Product",
            Category::General => "General",
        };
        f.pad(label)
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.name() == wanted)
            .ok_or_else(|| {
                format!(
                    "unknown category '{}' (expected one of: account, billing, technical, product, general)",
                    s
                )
            })
    }
}

/// A stored question with the keywords that select it and its answer.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FaqEntry {
    /// Human-readable form of the question, shown when listing the knowledge base.
    pub question: String,
    pub keywords: Vec<String>,
    pub answer: String,
}

impl FaqEntry {
    fn new(question: &str, keywords: &[&str], answer: &str) -> Self {
        Self {
            question: question.to_string(),
            keywords: to_strings(keywords),
            answer: answer.to_string(),
        }
    }
}

/// Everything the bot knows about one category.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CategoryProfile {
    pub name: Category,
    /// Trigger keywords; must not be empty.
    pub keywords: Vec<String>,
    /// Canned replies used when no FAQ entry matches.
    #[serde(default)]
    pub responses: Vec<String>,
    #[serde(default)]
    pub faqs: Vec<FaqEntry>,
}

/// Keyword lists feeding the escalation policy.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct EscalationKeywords {
    /// Any of these escalates regardless of category.
    pub urgency: Vec<String>,
    /// Escalate a billing request when one of these also appears.
    #[serde(default)]
    pub billing_dispute: Vec<String>,
}

/// The complete support configuration data.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct KnowledgeBase {
    pub categories: Vec<CategoryProfile>,
    pub escalation: EscalationKeywords,
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::builtin()
    }
}

impl KnowledgeBase {
    /// # Built-in Knowledge Base (`builtin`)
    ///
    /// The default customer-support data set, categories in priority order
    /// Account, Billing, Technical, Product, General.
    pub fn builtin() -> Self {
        let categories = vec![
            CategoryProfile {
                name: Category::Account,
                keywords: to_strings(&[
                    "account", "login", "log in", "password", "sign up", "register", "profile",
                ]),
                responses: to_strings(&[
                    "I can help you with account-related issues. What specific problem are you experiencing?",
                    "For account issues, I can assist with login problems, password resets, and account creation.",
                    "Let me help you with your account. Are you having trouble logging in or creating an account?",
                ]),
                faqs: vec![
                    FaqEntry::new(
                        "How do I reset my password?",
                        &["reset", "password", "forgot"],
                        "To reset your password, go to the login page and click 'Forgot Password'. You'll receive an email with reset instructions.",
                    ),
                    FaqEntry::new(
                        "How do I create an account?",
                        &["create", "sign up", "register", "new account"],
                        "To create an account, visit our signup page and fill in your details. You'll need a valid email address.",
                    ),
                    FaqEntry::new(
                        "My account is locked.",
                        &["locked", "blocked", "suspended"],
                        "If your account is locked, please contact our security team at security@company.com or call 1-800-SUPPORT.",
                    ),
                ],
            },
            CategoryProfile {
                name: Category::Billing,
                keywords: to_strings(&[
                    "billing", "payment", "invoice", "charge", "subscription", "refund", "money",
                ]),
                responses: to_strings(&[
                    "I can help you with billing and payment questions. What would you like to know?",
                    "For billing issues, I can assist with payments, invoices, and subscription management.",
                    "Let me help you with your billing inquiry. Are you looking for payment information or have a billing question?",
                ]),
                faqs: vec![
                    FaqEntry::new(
                        "How can I pay?",
                        &["pay", "payment method", "credit card", "paypal", "bank transfer"],
                        "You can pay through our website using credit card, PayPal, or bank transfer. Go to Billing > Payment Methods.",
                    ),
                    FaqEntry::new(
                        "What is your refund policy?",
                        &["refund", "money back", "money-back", "guarantee"],
                        "We offer a 30-day money-back guarantee. Contact billing@company.com for refund requests.",
                    ),
                    FaqEntry::new(
                        "When does my subscription renew?",
                        &["renew", "renewal", "cancel", "auto"],
                        "Your subscription will automatically renew unless cancelled 7 days before the renewal date.",
                    ),
                ],
            },
            CategoryProfile {
                name: Category::Technical,
                keywords: to_strings(&[
                    "error", "bug", "not working", "broken", "crash", "technical", "problem",
                ]),
                responses: to_strings(&[
                    "I can help you troubleshoot technical issues. Can you describe what's happening?",
                    "For technical problems, I'll need some details to help you effectively. What error are you seeing?",
                    "Let me help you resolve this technical issue. What specific problem are you experiencing?",
                ]),
                faqs: vec![
                    FaqEntry::new(
                        "The app is not loading.",
                        &["not loading", "won't load", "blank page", "loading"],
                        "Try clearing your browser cache and cookies. If the problem persists, try a different browser.",
                    ),
                    FaqEntry::new(
                        "The app is slow.",
                        &["slow", "performance", "lag", "freeze"],
                        "Check your internet connection and close unnecessary browser tabs. Clear cache if needed.",
                    ),
                    FaqEntry::new(
                        "I see an error message.",
                        &["error message", "error code", "message"],
                        "Please share the exact error message you're seeing so I can provide specific help.",
                    ),
                ],
            },
            CategoryProfile {
                name: Category::Product,
                keywords: to_strings(&["product", "feature", "how to", "tutorial", "guide", "help"]),
                responses: to_strings(&[
                    "I can help you learn about our products and features. What would you like to know?",
                    "For product questions, I can provide information about features, tutorials, and usage guides.",
                    "Let me help you with product information. What specific feature or product are you asking about?",
                ]),
                faqs: vec![
                    FaqEntry::new(
                        "How do I use the product?",
                        &["how to use", "tutorial", "guide", "video", "get started"],
                        "Check our Help Center for detailed tutorials and guides. You can also watch our video tutorials.",
                    ),
                    FaqEntry::new(
                        "Which features are available?",
                        &["feature", "available", "plan"],
                        "Feature availability depends on your subscription plan. Check your plan details in your account.",
                    ),
                    FaqEntry::new(
                        "What's new in the product?",
                        &["update", "latest", "release", "what's new"],
                        "We regularly update our products. Check our blog for the latest features and improvements.",
                    ),
                ],
            },
            CategoryProfile {
                name: Category::General,
                keywords: to_strings(&["question", "information", "inquiry", "contact", "hours"]),
                responses: to_strings(&[
                    "I understand you need help. Could you please provide more details about your issue?",
                    "I'm here to help! Can you tell me more about what you're experiencing?",
                    "Let me assist you with that. What specific problem are you facing?",
                    "I want to make sure I can help you effectively. Could you elaborate on your issue?",
                ]),
                faqs: vec![
                    FaqEntry::new(
                        "How do I contact support?",
                        &["contact", "phone", "email", "call"],
                        "You can reach our support team at support@company.com or by calling 1-800-SUPPORT.",
                    ),
                    FaqEntry::new(
                        "What are your support hours?",
                        &["hours", "opening", "when are you"],
                        "Our human support team is available Monday to Friday, 9am to 6pm. I'm here around the clock.",
                    ),
                ],
            },
        ];

        let escalation = EscalationKeywords {
            urgency: to_strings(&[
                "urgent",
                "emergency",
                "immediately",
                "asap",
                "critical",
                "broken",
                "not working",
                "frustrated",
                "angry",
                "complaint",
                "escalate",
                "manager",
                "human",
                "speak to someone",
                "real person",
            ]),
            billing_dispute: to_strings(&[
                "refund",
                "dispute",
                "chargeback",
                "double charged",
                "unauthorized",
            ]),
        };

        Self {
            categories,
            escalation,
        }
    }

    /// Parses and validates a knowledge base from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let kb: KnowledgeBase =
            toml::from_str(content).context("Failed to parse knowledge base TOML")?;
        kb.validate()?;
        Ok(kb)
    }

    /// # Load Knowledge Base (`load`)
    ///
    /// Reads a knowledge-base file, parses it and validates it.
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading knowledge base from: {}", path.display());
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read knowledge base file: {}", path.display()))?;
        let kb = Self::from_toml_str(&content)
            .with_context(|| format!("Invalid knowledge base file: {}", path.display()))?;
        debug!("Loaded knowledge base with {} categories", kb.categories.len());
        Ok(kb)
    }

    /// Loads `path` when one is configured, otherwise returns the built-in data.
    pub fn load_or_builtin(path: Option<&str>) -> Result<Self> {
        match path {
            Some(p) => Self::load(Path::new(p)),
            None => {
                debug!("No knowledge base file configured; using built-in data");
                Ok(Self::builtin())
            }
        }
    }

    /// Returns the profile of `category`. Validation guarantees one exists.
    pub fn profile(&self, category: Category) -> Option<&CategoryProfile> {
        self.categories.iter().find(|p| p.name == category)
    }

    /// Checks the knowledge-base invariants.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for profile in &self.categories {
            if !seen.insert(profile.name) {
                return Err(invalid(format!(
                    "category '{}' is declared more than once",
                    profile.name.name()
                )));
            }
            if profile.keywords.is_empty() {
                return Err(invalid(format!(
                    "category '{}' has no trigger keywords",
                    profile.name.name()
                )));
            }
            if profile.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(invalid(format!(
                    "category '{}' has a blank trigger keyword",
                    profile.name.name()
                )));
            }
            for faq in &profile.faqs {
                if faq.keywords.is_empty() || faq.keywords.iter().any(|k| k.trim().is_empty()) {
                    return Err(invalid(format!(
                        "FAQ '{}' in category '{}' needs non-blank keywords",
                        faq.question,
                        profile.name.name()
                    )));
                }
                if faq.answer.trim().is_empty() {
                    return Err(invalid(format!(
                        "FAQ '{}' in category '{}' has an empty answer",
                        faq.question,
                        profile.name.name()
                    )));
                }
            }
        }
        if let Some(missing) = Category::ALL.into_iter().find(|c| !seen.contains(c)) {
            return Err(invalid(format!("category '{}' is missing", missing.name())));
        }
        if self
            .escalation
            .urgency
            .iter()
            .chain(&self.escalation.billing_dispute)
            .any(|k| k.trim().is_empty())
        {
            return Err(invalid("escalation keywords must not be blank".to_string()));
        }
        Ok(())
    }
}

fn invalid(message: String) -> anyhow::Error {
    anyhow!(ParleyError::KnowledgeBase(message))
}
