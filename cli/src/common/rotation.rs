//! # Parley Response Rotation (`common::rotation`)
//!
//! File: cli/src/common/rotation.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Both bots choose among several equivalent phrasings (ELIZA templates,
//! canned category responses, greetings). Selection is a deterministic
//! round-robin kept per named list: the first use of a list yields its first
//! entry, the next use the second, wrapping around at the end. Identical
//! input sequences therefore always produce identical conversations.
//!
use std::collections::HashMap;

/// Per-list round-robin cursors.
#[derive(Debug, Default, Clone)]
pub struct Rotation {
    cursors: HashMap<String, usize>,
}

impl Rotation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next entry of `options` for the list named `key`,
    /// advancing that list's cursor. `None` only when `options` is empty.
    pub fn pick<'a, T>(&mut self, key: &str, options: &'a [T]) -> Option<&'a T> {
        if options.is_empty() {
            return None;
        }
        let cursor = self.cursors.entry(key.to_string()).or_insert(0);
        let choice = &options[*cursor % options.len()];
        *cursor = cursor.wrapping_add(1);
        Some(choice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycles_in_order() {
        let mut rotation = Rotation::new();
        let options = ["a", "b", "c"];
        let picked: Vec<_> = (0..5)
            .map(|_| *rotation.pick("letters", &options).unwrap())
            .collect();
        assert_eq!(picked, vec!["a", "b", "c", "a", "b"]);
    }

    #[test]
    fn test_lists_are_independent() {
        let mut rotation = Rotation::new();
        assert_eq!(rotation.pick("x", &[1, 2]), Some(&1));
        assert_eq!(rotation.pick("y", &[10, 20]), Some(&10));
        assert_eq!(rotation.pick("x", &[1, 2]), Some(&2));
    }

    #[test]
    fn test_empty_options() {
        let mut rotation = Rotation::new();
        let empty: [&str; 0] = [];
        assert_eq!(rotation.pick("none", &empty), None);
    }
}
