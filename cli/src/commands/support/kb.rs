//! # Support Knowledge Base Listing
//!
//! File: cli/src/commands/support/kb.rs
//! Author: Christi Mahu
//!
//! Implements `parley support kb`: prints each category (in classifier
//! priority order) with its trigger keywords and FAQ entries, followed by
//! the escalation keyword lists. `--category` restricts the listing to one
//! category and omits the escalation lists.
//!
use crate::core::config::SupportConfig;
use crate::core::error::Result;
use crate::support::classifier::Classifier;
use crate::support::faq::FaqStore;
use crate::support::knowledge::{Category, KnowledgeBase};
use clap::Parser;
use std::fmt::Write as _;

#[derive(Parser, Debug)]
pub struct KbArgs {
    /// Only show this category (account, billing, technical, product, general).
    #[arg(short, long)]
    pub category: Option<Category>,
}

pub fn handle_kb(args: KbArgs, settings: &SupportConfig) -> Result<()> {
    let kb = super::load_knowledge(settings)?;
    print!("{}", render_listing(&kb, args.category)?);
    Ok(())
}

fn render_listing(kb: &KnowledgeBase, only: Option<Category>) -> Result<String> {
    let classifier = Classifier::new(kb);
    let faqs = FaqStore::new(kb);
    let mut out = String::new();

    for (rank, category) in classifier.priority().enumerate() {
        if only.is_some_and(|wanted| wanted != category) {
            continue;
        }
        let Some(profile) = kb.profile(category) else {
            continue;
        };
        writeln!(out, "{} (priority {})", category, rank + 1)?;
        writeln!(out, "  Keywords: {}", profile.keywords.join(", "))?;
        let mut entries = faqs.entries(category).peekable();
        if entries.peek().is_none() {
            writeln!(out, "  FAQs: (none)")?;
        } else {
            writeln!(out, "  FAQs:")?;
            for entry in entries {
                writeln!(out, "    - {} [{}]", entry.question, entry.keywords.join(", "))?;
                writeln!(out, "      {}", entry.answer)?;
            }
        }
        writeln!(out)?;
    }

    if only.is_none() {
        writeln!(out, "Escalation")?;
        writeln!(out, "  Urgency: {}", kb.escalation.urgency.join(", "))?;
        writeln!(
            out,
            "  Billing disputes: {}",
            kb.escalation.billing_dispute.join(", ")
        )?;
    }
    Ok(out)
}
