//! # Support Classify Command
//!
//! File: cli/src/commands/support/classify.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Implements `parley support classify <TEXT>...`. Runs a message through the
//! classifier, the escalation policy and the FAQ store exactly as a support
//! session would, and prints the three results:
//!
//! ```text
//! Category:  Account
//! Escalate:  yes
//! FAQ:       If your account is locked, please contact our security team ...
//! ```
//!
use crate::core::config::SupportConfig;
use crate::core::error::Result;
use crate::support::classifier::Classifier;
use crate::support::escalation::EscalationPolicy;
use crate::support::faq::FaqStore;
use crate::support::knowledge::{Category, KnowledgeBase};
use clap::Parser;

#[derive(Parser, Debug)]
pub struct ClassifyArgs {
    /// The customer message to analyse.
    #[arg(required = true)]
    pub text: Vec<String>,
}

/// The outcome of analysing one message.
#[derive(Debug, PartialEq, Eq)]
struct Analysis {
    category: Category,
    escalate: bool,
    faq_answer: Option<String>,
}

fn analyse(kb: &KnowledgeBase, message: &str) -> Analysis {
    let category = Classifier::new(kb).classify(message);
    Analysis {
        category,
        escalate: EscalationPolicy::new(&kb.escalation).should_escalate(message, category),
        faq_answer: FaqStore::new(kb)
            .lookup(category, message)
            .map(str::to_string),
    }
}

pub fn handle_classify(args: ClassifyArgs, settings: &SupportConfig) -> Result<()> {
    let kb = super::load_knowledge(settings)?;
    let analysis = analyse(&kb, &args.text.join(" "));
    println!("Category:  {}", analysis.category);
    println!(
        "Escalate:  {}",
        if analysis.escalate { "yes" } else { "no" }
    );
    println!(
        "FAQ:       {}",
        analysis.faq_answer.as_deref().unwrap_or("(no match)")
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyse_locked_account() {
        let analysis = analyse(
            &KnowledgeBase::builtin(),
            "My account is locked, this is urgent!",
        );
        assert_eq!(analysis.category, Category::Account);
        assert!(analysis.escalate);
        assert!(analysis
            .faq_answer
            .unwrap()
            .contains("security@company.com"));
    }

    #[test]
    fn test_analyse_unmatched() {
        let analysis = analyse(&KnowledgeBase::builtin(), "good morning");
        assert_eq!(
            analysis,
            Analysis {
                category: Category::General,
                escalate: false,
                faq_answer: None,
            }
        );
    }
}
