//! # FAQ Store (`support::faq`)
//!
//! File: cli/src/support/faq.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Answers frequently asked questions. A lookup only ever considers the FAQ
//! entries of the category it is given, so an answer can never come from a
//! different category than the one the classifier chose.
//!
//! Scoring: an entry's score is the number of its keywords present in the
//! utterance (case-insensitive substring). The highest score wins, ties go to
//! the entry declared first, and a best score of zero means no answer.
//!
use crate::common::text::KeywordSet;
use crate::support::knowledge::{Category, FaqEntry, KnowledgeBase};
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone)]
struct IndexedFaq {
    entry: FaqEntry,
    keywords: KeywordSet,
}

/// Per-category FAQ entries with pre-normalised keywords.
#[derive(Debug, Clone, Default)]
pub struct FaqStore {
    by_category: HashMap<Category, Vec<IndexedFaq>>,
}

impl FaqStore {
    pub fn new(kb: &KnowledgeBase) -> Self {
        let by_category = kb
            .categories
            .iter()
            .map(|profile| {
                let entries = profile
                    .faqs
                    .iter()
                    .map(|entry| IndexedFaq {
                        keywords: KeywordSet::new(&entry.keywords),
                        entry: entry.clone(),
                    })
                    .collect();
                (profile.name, entries)
            })
            .collect();
        Self { by_category }
    }

    /// # Best Matching Entry (`best_match`)
    ///
    /// Returns the highest-scoring entry of `category`, or `None` when no
    /// entry shares a keyword with `utterance`.
    pub fn best_match(&self, category: Category, utterance: &str) -> Option<&FaqEntry> {
        let lowered = utterance.to_lowercase();
        let entries = self.by_category.get(&category)?;

        let mut best: Option<(&IndexedFaq, usize)> = None;
        for faq in entries {
            let score = faq.keywords.count_matches(&lowered);
            if score > best.map_or(0, |(_, s)| s) {
                best = Some((faq, score));
            }
        }

        match best {
            Some((faq, score)) => {
                debug!("FAQ '{}' matched with score {}", faq.entry.question, score);
                Some(&faq.entry)
            }
            None => {
                debug!("No FAQ entry in {} matched", category);
                None
            }
        }
    }

    /// # FAQ Lookup (`lookup`)
    ///
    /// The answer text of `best_match`, if any.
    pub fn lookup(&self, category: Category, utterance: &str) -> Option<&str> {
        self.best_match(category, utterance)
            .map(|entry| entry.answer.as_str())
    }

    /// All entries of `category` in declaration order.
    pub fn entries(&self, category: Category) -> impl Iterator<Item = &FaqEntry> + '_ {
        self.by_category
            .get(&category)
            .into_iter()
            .flatten()
            .map(|faq| &faq.entry)
    }
}
