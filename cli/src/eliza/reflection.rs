//! # Pronoun Reflection (`eliza::reflection`)
//!
//! File: cli/src/eliza/reflection.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Reflection turns a first-person fragment into a second-person one
//! ("my job bores me" → "your job bores you") so the responder can echo the
//! user's words back as a question. The swap is a plain word-for-word lookup
//! in `REFLECTIONS`; words not in the table pass through untouched.
//!
//! Case handling: a reflected word keeps the capitalisation of the word it
//! replaces ("My" → "Your"), except for the always-capitalised "I" forms, whose
//! capital carries no information ("I" → "you", not "You").
//!

/// First/second-person swaps. Keys are lowercase.
const REFLECTIONS: &[(&str, &str)] = &[
    ("am", "are"),
    ("was", "were"),
    ("i", "you"),
    ("i'd", "you would"),
    ("i've", "you have"),
    ("i'll", "you will"),
    ("i'm", "you are"),
    ("my", "your"),
    ("are", "am"),
    ("you've", "I have"),
    ("you'll", "I will"),
    ("your", "my"),
    ("yours", "mine"),
    ("you", "me"),
    ("me", "you"),
    ("myself", "yourself"),
    ("yourself", "myself"),
];

/// Words that are capitalised by spelling rather than by sentence position.
const ALWAYS_CAPITALISED: &[&str] = &["i", "i'd", "i've", "i'll", "i'm"];

fn lookup(word: &str) -> Option<&'static str> {
    REFLECTIONS
        .iter()
        .find(|(from, _)| *from == word)
        .map(|(_, to)| *to)
}

fn capitalise_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Reflects a single whitespace-delimited token, keeping any punctuation
/// around the word itself ("me," → "you,").
fn reflect_token(token: &str) -> String {
    let Some(start) = token.find(char::is_alphanumeric) else {
        return token.to_string();
    };
    let end = token
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_alphanumeric())
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(token.len());
    let (lead, core, trail) = (&token[..start], &token[start..end], &token[end..]);

    let lowered = core.to_lowercase().replace('\u{2019}', "'");
    match lookup(&lowered) {
        Some(replacement) => {
            let keep_capital = core.starts_with(char::is_uppercase)
                && !ALWAYS_CAPITALISED.contains(&lowered.as_str());
            let replacement = if keep_capital {
                capitalise_first(replacement)
            } else {
                replacement.to_string()
            };
            format!("{lead}{replacement}{trail}")
        }
        None => token.to_string(),
    }
}

/// # Reflect Fragment (`reflect`)
///
/// Swaps first- and second-person words throughout `fragment`. Whitespace
/// runs collapse to single spaces.
pub fn reflect(fragment: &str) -> String {
    fragment
        .split_whitespace()
        .map(reflect_token)
        .collect::<Vec<_>>()
        .join(" ")
}
