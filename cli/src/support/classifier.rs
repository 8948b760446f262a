//! # Support Request Classifier (`support::classifier`)
//!
//! File: cli/src/support/classifier.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Maps an utterance to a support `Category`. Categories are scanned in the
//! knowledge base's declaration order and the first one with a trigger
//! keyword present in the utterance (case-insensitive substring) wins.
//! Nothing matching means `General`.
//!
use crate::common::text::KeywordSet;
use crate::support::knowledge::{Category, KnowledgeBase};
use tracing::debug;

/// Keyword classifier built from a knowledge base.
#[derive(Debug, Clone)]
pub struct Classifier {
    order: Vec<(Category, KeywordSet)>,
}

impl Classifier {
    pub fn new(kb: &KnowledgeBase) -> Self {
        let order = kb
            .categories
            .iter()
            .map(|profile| (profile.name, KeywordSet::new(&profile.keywords)))
            .collect();
        Self { order }
    }

    /// # Classify Utterance (`classify`)
    ///
    /// Returns the first category, in priority order, with a keyword present
    /// in `utterance`; `Category::General` if none is.
    pub fn classify(&self, utterance: &str) -> Category {
        let lowered = utterance.to_lowercase();
        let category = self
            .order
            .iter()
            .find(|(_, keywords)| keywords.matches_any(&lowered))
            .map(|(category, _)| *category)
            .unwrap_or(Category::General);
        debug!("Classified utterance as {}", category);
        category
    }

    /// Categories in the order they are tried.
    pub fn priority(&self) -> impl Iterator<Item = Category> + '_ {
        self.order.iter().map(|(category, _)| *category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> Classifier {
        Classifier::new(&KnowledgeBase::builtin())
    }

    #[test]
    fn test_unique_keywords_select_their_category() {
        let c = classifier();
        assert_eq!(c.classify("I can't login"), Category::Account);
        assert_eq!(c.classify("Where is my INVOICE?"), Category::Billing);
        assert_eq!(c.classify("The app keeps crashing"), Category::Technical);
        assert_eq!(c.classify("Is there a tutorial?"), Category::Product);
        assert_eq!(c.classify("What are your opening hours?"), Category::General);
    }

    #[test]
    fn test_every_builtin_keyword_classifies_alone() {
        let kb = KnowledgeBase::builtin();
        let c = Classifier::new(&kb);
        for profile in &kb.categories {
            for keyword in &profile.keywords {
                let utterance = format!("well, {} then", keyword.to_uppercase());
                assert_eq!(
                    c.classify(&utterance),
                    profile.name,
                    "keyword '{}' should select {}",
                    keyword,
                    profile.name
                );
            }
        }
    }

    #[test]
    fn test_no_keyword_falls_back_to_general() {
        let c = classifier();
        assert_eq!(c.classify("good morning"), Category::General);
        assert_eq!(c.classify(""), Category::General);
    }

    #[test]
    fn test_priority_order_breaks_ties() {
        let c = classifier();
        // "password" (Account) and "payment" (Billing): Account is declared first.
        assert_eq!(
            c.classify("my payment failed after the password change"),
            Category::Account
        );
        assert_eq!(
            c.priority().collect::<Vec<_>>(),
            Category::ALL.to_vec()
        );
    }

    #[test]
    fn test_account_locked_scenario() {
        assert_eq!(
            classifier().classify("My account is locked, this is urgent!"),
            Category::Account
        );
    }

    #[test]
    fn test_reset_password_scenario() {
        assert_eq!(
            classifier().classify("How do I reset my password?"),
            Category::Account
        );
    }
}
