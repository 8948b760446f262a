//! # Parley Support Integration Tests
//!
//! File: cli/tests/support.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Integration tests for the `parley support` command group (`chat`,
//! `classify`, `kb`), driving the binary through stdin/stdout.
//!

mod common;
use common::*;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_classify_locked_account() {
    let dir = sandbox();
    parley_in(dir.path())
        .args(["support", "classify", "My account is locked, this is urgent!"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Category:  Account"))
        .stdout(predicate::str::contains("Escalate:  yes"))
        .stdout(predicate::str::contains("security@company.com"));
}

#[test]
fn test_classify_password_reset() {
    let dir = sandbox();
    parley_in(dir.path())
        .args(["s", "classify", "How", "do", "I", "reset", "my", "password?"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Category:  Account"))
        .stdout(predicate::str::contains("Escalate:  no"))
        .stdout(predicate::str::contains(
            "FAQ:       To reset your password, go to the login page",
        ));
}

#[test]
fn test_classify_unmatched_is_general() {
    let dir = sandbox();
    parley_in(dir.path())
        .args(["support", "classify", "good morning"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Category:  General"))
        .stdout(predicate::str::contains("FAQ:       (no match)"));
}

#[test]
fn test_kb_listing() {
    let dir = sandbox();
    parley_in(dir.path())
        .args(["support", "kb"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Account (priority 1)"))
        .stdout(predicate::str::contains("Escalation"));

    parley_in(dir.path())
        .args(["support", "kb", "--category", "technical"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Technical (priority 3)"))
        .stdout(predicate::str::contains("Billing").not());
}

#[test]
fn test_chat_full_ticket_flow() {
    let dir = sandbox();
    let script = "Dana\n\
                  My account is locked, this is urgent!\n\
                  create ticket\n\
                  ticket status TICKET-1001\n\
                  close ticket TICKET-1001\n\
                  my tickets\n\
                  ticket status TICKET-9999\n\
                  bye\n";
    parley_in(dir.path())
        .args(["support", "chat"])
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("What's your name?"))
        .stdout(predicate::str::contains("Nice to meet you, Dana!"))
        .stdout(predicate::str::contains("human specialist"))
        .stdout(predicate::str::contains(
            "priority support ticket for you: TICKET-1001",
        ))
        .stdout(predicate::str::contains(
            "Ticket TICKET-1001 status: Escalated. Category: Account.",
        ))
        .stdout(predicate::str::contains("Ticket TICKET-1001 is now closed."))
        .stdout(predicate::str::contains("Closed"))
        .stdout(predicate::str::contains(
            "Ticket TICKET-9999 not found. Please check the ticket number.",
        ))
        .stdout(predicate::str::contains("Have a great day, Dana!"));
}

#[test]
fn test_chat_help_and_faq() {
    let dir = sandbox();
    parley_in(dir.path())
        .args(["support", "chat", "--name", "Sam"])
        .write_stdin("help\nWhich payment methods can I pay with?\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("What's your name?").not())
        .stdout(predicate::str::contains("Support categories:"))
        .stdout(predicate::str::contains("close ticket <ID>"))
        .stdout(predicate::str::contains(
            "You can pay through our website using credit card, PayPal, or bank transfer.",
        ));
}

#[test]
fn test_chat_offers_ticket_after_threshold() {
    let dir = sandbox();
    fs::write(
        dir.path().join(".parley.toml"),
        "[support]\noffer_ticket_after = 1\nticket_prefix = \"HELP\"\nticket_start = 0\n",
    )
    .unwrap();
    parley_in(dir.path())
        .args(["support", "chat", "--name", "Sam"])
        .write_stdin("The app keeps crashing\nIt crashed again\nyes\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Would you like me to create a support ticket for this issue? (yes/no)",
        ))
        .stdout(predicate::str::contains(
            "I've created a support ticket for you: HELP-1.",
        ));
}

#[test]
fn test_custom_messages_and_knowledge_file() {
    let dir = sandbox();
    let kb = dir.path().join("kb.toml");
    fs::write(
        &kb,
        r#"
[escalation]
urgency = ["now"]

[[categories]]
name = "account"
keywords = ["login"]

[[categories]]
name = "billing"
keywords = ["invoice"]

[[categories.faqs]]
question = "Where is my invoice?"
keywords = ["invoice", "where"]
answer = "Invoices are under Settings > Billing."

[[categories]]
name = "technical"
keywords = ["crash"]

[[categories]]
name = "product"
keywords = ["feature"]

[[categories]]
name = "general"
keywords = ["question"]
responses = ["Tell me more."]
"#,
    )
    .unwrap();
    fs::write(
        dir.path().join(".parley.toml"),
        format!(
            "[support]\nknowledge_file = {:?}\n\n[support.messages]\nfarewell = \"Ciao, {{{{ user_name }}}}.\"\n",
            kb.to_string_lossy()
        ),
    )
    .unwrap();

    parley_in(dir.path())
        .args(["support", "chat", "--name", "Ana"])
        .write_stdin("where is my invoice\nhmm\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Invoices are under Settings > Billing."))
        .stdout(predicate::str::contains("Ana: Aliza: Tell me more."))
        .stdout(predicate::str::contains("Ciao, Ana."));
}

#[test]
fn test_missing_knowledge_file_fails() {
    let dir = sandbox();
    fs::write(
        dir.path().join(".parley.toml"),
        "[support]\nknowledge_file = \"/nonexistent/kb.toml\"\n",
    )
    .unwrap();
    parley_in(dir.path())
        .args(["support", "kb"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist or is not a file"));
}
