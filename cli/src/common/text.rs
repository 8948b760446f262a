//! # Parley Text Matching Utilities (`common::text`)
//!
//! File: cli/src/common/text.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The support-bot matchers (category triggers, FAQ keywords, urgency
//! keywords) share one rule: a keyword matches when it occurs as a
//! case-insensitive substring of the utterance. Responder triggers are
//! stricter and must match whole words.
//!
//! - `KeywordSet`: a lowercased, ordered list of keywords with `matches_any`
//!   and `count_matches` against already-lowercased text.
//! - `trigger_regex`: compiles a responder trigger into a case-insensitive,
//!   word-bounded pattern.
//! - `trim_trailing_punctuation`: strips sentence punctuation from a fragment.
//!
use regex::Regex;

/// An ordered list of lowercase keywords matched as substrings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    words: Vec<String>,
}

impl KeywordSet {
    /// Builds a set from any list of keywords. Keywords are trimmed and
    /// lowercased; blank entries are dropped.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// True if any keyword occurs in `lowered`, which must already be lowercase.
    pub fn matches_any(&self, lowered: &str) -> bool {
        self.words.iter().any(|w| lowered.contains(w.as_str()))
    }

    /// Number of distinct keywords occurring in `lowered`.
    pub fn count_matches(&self, lowered: &str) -> usize {
        self.words
            .iter()
            .filter(|w| lowered.contains(w.as_str()))
            .count()
    }
}

const APOSTROPHES: [char; 2] = ['\'', '\u{2019}'];

/// # Trigger Pattern (`trigger_regex`)
///
/// Compiles `trigger` into a case-insensitive pattern that only matches whole
/// words: a trigger starting (ending) with a word character needs a word
/// boundary before (after) it. Whitespace inside the trigger matches any run
/// of whitespace, and an apostrophe is optional and matches both `'` and `’`,
/// so `"i'm"` matches "I'm", "I’m" and "Im".
pub fn trigger_regex(trigger: &str) -> Result<Regex, regex::Error> {
    let trigger = trigger.trim();
    let is_word = |c: char| c.is_alphanumeric() || c == '_';

    let words: Vec<String> = trigger
        .split_whitespace()
        .map(|word| {
            word.chars()
                .map(|c| {
                    if APOSTROPHES.contains(&c) {
                        "['\u{2019}]?".to_string()
                    } else {
                        regex::escape(c.encode_utf8(&mut [0; 4]))
                    }
                })
                .collect()
        })
        .collect();

    let mut pattern = String::from("(?i)");
    if trigger.starts_with(is_word) {
        pattern.push_str(r"\b");
    }
    pattern.push_str(&words.join(r"\s+"));
    if trigger.ends_with(is_word) {
        pattern.push_str(r"\b");
    }
    Regex::new(&pattern)
}

/// Strips trailing sentence punctuation and whitespace.
pub fn trim_trailing_punctuation(fragment: &str) -> &str {
    fragment.trim_end_matches(|c: char| c.is_whitespace() || matches!(c, '.' | '!' | '?' | ',' | ';'))
}
