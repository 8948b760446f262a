//! # Parley Message Templating
//!
//! File: cli/src/core/templating.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module renders the user-visible messages of the support bot
//! (greetings, help text, ticket confirmations...) with the Tera templating
//! engine. Templates are short strings held in configuration, so rendering is
//! a one-off per message rather than a preloaded template directory.
//!
//! ## Examples
//!
//! ```rust
//! let mut context = HashMap::new();
//! context.insert("bot_name".to_string(), "Aliza".to_string());
//!
//! let text = templating::render_message("Hi, I'm {{ bot_name }}.", &context)?;
//! assert_eq!(text, "Hi, I'm Aliza.");
//! ```
//!
//! Autoescaping is disabled: output goes to a terminal, not an HTML page.
//!
use crate::core::error::{ParleyError, Result};
use anyhow::anyhow;
use std::collections::HashMap;
use tera::Tera;
use tracing::debug;

/// # Render Message (`render_message`)
///
/// Renders a single Tera template string against a flat string context.
///
/// ## Arguments
///
/// * `template` - The template source, e.g. `"Ticket {{ ticket_id }} created."`.
/// * `context_map` - Values available to the template by name.
///
/// ## Returns
///
/// * `Result<String>` - The rendered text, or a `ParleyError::Template` wrapped
///   in `anyhow` when the template is malformed or references an unknown variable.
pub fn render_message(template: &str, context_map: &HashMap<String, String>) -> Result<String> {
    let tera_context = tera::Context::from_serialize(context_map).map_err(|e| {
        anyhow!(ParleyError::Template { source: e })
            .context("Failed to create Tera context from map")
    })?;
    let rendered = Tera::one_off(template, &tera_context, false).map_err(|e| {
        anyhow!(ParleyError::Template { source: e })
            .context(format!("Tera rendering failed for message template '{}'", template))
    })?;
    debug!("Rendered message template ({} chars)", rendered.len());
    Ok(rendered)
}

/// # Check Template Syntax (`check_template`)
///
/// Parses a template without rendering it, so configuration loading can
/// reject broken message overrides up front instead of on the first turn
/// that needs them.
pub fn check_template(name: &str, template: &str) -> Result<()> {
    let mut tera = Tera::default();
    tera.add_raw_template(name, template).map_err(|e| {
        anyhow!(ParleyError::Template { source: e })
            .context(format!("Invalid message template '{}'", name))
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_render_simple_message() -> Result<()> {
        let ctx = context(&[("bot_name", "Aliza"), ("user_name", "Sam")]);
        let text = render_message("Thanks for contacting {{ bot_name }}, {{ user_name }}!", &ctx)?;
        assert_eq!(text, "Thanks for contacting Aliza, Sam!");
        Ok(())
    }

    #[test]
    fn test_render_does_not_escape() -> Result<()> {
        let ctx = context(&[("answer", "Go to Billing > Payment Methods & pay")]);
        let text = render_message("{{ answer }}", &ctx)?;
        assert_eq!(text, "Go to Billing > Payment Methods & pay");
        Ok(())
    }

    #[test]
    fn test_render_invalid_template_syntax() {
        let ctx = context(&[("name", "test")]);
        let result = render_message("Hello {{ name", &ctx);
        assert!(result.is_err());
        let error_string = result.unwrap_err().to_string();
        assert!(error_string.contains("Tera rendering failed"));
    }

    #[test]
    fn test_render_unknown_variable_fails() {
        let result = render_message("Hello {{ missing }}", &HashMap::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_check_template() {
        assert!(check_template("greeting", "Hi {{ bot_name }}").is_ok());
        let err = check_template("farewell", "Bye {% if %}").unwrap_err();
        assert!(err.to_string().contains("Invalid message template 'farewell'"));
    }
}
