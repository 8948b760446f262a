//! # Parley Configuration System
//!
//! File: cli/src/core/config.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module loads, merges and validates the Parley configuration. It
//! supports a multi-level approach that combines built-in defaults, user
//! settings and project-specific overrides, or a single explicit file.
//!
//! ## Architecture
//!
//! Configuration sources:
//! 1. An explicit file given with `--config` (or `PARLEY_CONFIG`); when present
//!    it is the only source besides the defaults.
//! 2. Project-specific `.parley.toml` in the current directory or an ancestor
//!    (the search stops at a directory containing `.git`).
//! 3. User-specific `config.toml` in the platform config directory
//!    (e.g. `~/.config/parley/config.toml` on Linux).
//! 4. Default values defined in the code.
//!
//! Project settings override user settings field by field. Paths are
//! tilde-expanded, then the result is validated before any bot is built.
//!
//! ## Examples
//!
//! ```toml
//! [support]
//! bot_name = "Aliza"
//! ticket_prefix = "HELP"
//! offer_ticket_after = 5
//! knowledge_file = "~/parley/kb.toml"
//!
//! [support.messages]
//! farewell = "Bye for now, {{ user_name }}!"
//!
//! [eliza]
//! rules_file = "~/parley/rules.toml"
//! ```
//!
use crate::core::error::{ParleyError, Result};
use crate::support::messages::MessageTemplates;
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// The main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub support: SupportConfig,
    #[serde(default)]
    pub eliza: ElizaConfig,
}

/// Settings of the customer-support bot (`parley support ...`).
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SupportConfig {
    #[serde(default = "default_support_bot_name")]
    pub bot_name: String,
    /// Name used until the user tells us theirs.
    #[serde(default = "default_user_name")]
    pub default_user_name: String,
    #[serde(default = "default_ticket_prefix")]
    pub ticket_prefix: String,
    /// Ticket counter start; the first ticket gets `ticket_start + 1`.
    #[serde(default = "default_ticket_start")]
    pub ticket_start: u64,
    /// Offer a ticket once the history holds more turns than this.
    #[serde(default = "default_offer_ticket_after")]
    pub offer_ticket_after: usize,
    /// Knowledge-base TOML file (can use ~). Built-in data when absent.
    pub knowledge_file: Option<String>,
    #[serde(default)]
    pub messages: MessageTemplates,
}

/// Settings of the pattern-matching bot (`parley eliza ...`).
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ElizaConfig {
    #[serde(default = "default_eliza_bot_name")]
    pub bot_name: String,
    /// Rule-set TOML file (can use ~). Built-in rules when absent.
    pub rules_file: Option<String>,
}

fn default_support_bot_name() -> String {
    "Aliza".to_string()
}
fn default_user_name() -> String {
    crate::support::tickets::DEFAULT_REQUESTER.to_string()
}
fn default_ticket_prefix() -> String {
    "TICKET".to_string()
}
fn default_ticket_start() -> u64 {
    1000
}
fn default_offer_ticket_after() -> usize {
    3
}
fn default_eliza_bot_name() -> String {
    "ELIZA".to_string()
}

impl Default for SupportConfig {
    fn default() -> Self {
        Self {
            bot_name: default_support_bot_name(),
            default_user_name: default_user_name(),
            ticket_prefix: default_ticket_prefix(),
            ticket_start: default_ticket_start(),
            offer_ticket_after: default_offer_ticket_after(),
            knowledge_file: None,
            messages: MessageTemplates::default(),
        }
    }
}

impl Default for ElizaConfig {
    fn default() -> Self {
        Self {
            bot_name: default_eliza_bot_name(),
            rules_file: None,
        }
    }
}

const PROJECT_CONFIG_FILENAME: &str = ".parley.toml";

/// # Load Configuration (`load_config`)
///
/// Loads the effective configuration.
///
/// ## Arguments
///
/// * `explicit` - A file passed with `--config`. When given, user and project
///   files are ignored.
///
/// ## Returns
///
/// * `Result<Config>` - The merged, path-expanded and validated configuration.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let mut config = match explicit {
        Some(path) => {
            let expanded = PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned());
            info!("Loading configuration from: {}", expanded.display());
            load_config_from_path(&expanded)?
        }
        None => {
            let user_config = load_user_config()?;
            let current_dir =
                std::env::current_dir().context("Failed to get current directory")?;
            let project_config = load_project_config(&current_dir)?;
            merge_configs(user_config.unwrap_or_default(), project_config)
        }
    };
    expand_config_paths(&mut config);
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "Parley", "parley") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config(start: &Path) -> Result<Option<Config>> {
    if let Some(project_config_path) = find_project_config_path_from(start) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.parley.toml) found in current directory or ancestors.");
        Ok(None)
    }
}

/// Walks from `start` towards the root looking for `.parley.toml`, stopping
/// at the first directory that contains `.git`.
fn find_project_config_path_from(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Project values win wherever they differ from the defaults.
fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project_cfg = match project {
        Some(p) => p,
        None => return user,
    };
    let defaults = Config::default();
    let mut merged = Config::default();

    merged.support.bot_name = if project_cfg.support.bot_name != defaults.support.bot_name {
        project_cfg.support.bot_name
    } else {
        user.support.bot_name
    };
    merged.support.default_user_name =
        if project_cfg.support.default_user_name != defaults.support.default_user_name {
            project_cfg.support.default_user_name
        } else {
            user.support.default_user_name
        };
    merged.support.ticket_prefix =
        if project_cfg.support.ticket_prefix != defaults.support.ticket_prefix {
            project_cfg.support.ticket_prefix
        } else {
            user.support.ticket_prefix
        };
    merged.support.ticket_start =
        if project_cfg.support.ticket_start != defaults.support.ticket_start {
            project_cfg.support.ticket_start
        } else {
            user.support.ticket_start
        };
    merged.support.offer_ticket_after =
        if project_cfg.support.offer_ticket_after != defaults.support.offer_ticket_after {
            project_cfg.support.offer_ticket_after
        } else {
            user.support.offer_ticket_after
        };
    merged.support.knowledge_file = project_cfg
        .support
        .knowledge_file
        .or(user.support.knowledge_file);
    merged.support.messages = merge_messages(user.support.messages, project_cfg.support.messages);
    merged.eliza.bot_name = if project_cfg.eliza.bot_name != defaults.eliza.bot_name {
        project_cfg.eliza.bot_name
    } else {
        user.eliza.bot_name
    };
    merged.eliza.rules_file = project_cfg.eliza.rules_file.or(user.eliza.rules_file);
    merged
}

/// Merges `[support.messages]` template by template: a project template wins
/// when it differs from the default.
fn merge_messages(user: MessageTemplates, project: MessageTemplates) -> MessageTemplates {
    let defaults = MessageTemplates::default();
    MessageTemplates {
        greetings: overridden(project.greetings, user.greetings, &defaults.greetings),
        ask_name: overridden(project.ask_name, user.ask_name, &defaults.ask_name),
        welcome: overridden(project.welcome, user.welcome, &defaults.welcome),
        welcome_anonymous: overridden(project.welcome_anonymous, user.welcome_anonymous, &defaults.welcome_anonymous),
        hint: overridden(project.hint, user.hint, &defaults.hint),
        help: overridden(project.help, user.help, &defaults.help),
        farewell: overridden(project.farewell, user.farewell, &defaults.farewell),
        escalations: overridden(project.escalations, user.escalations, &defaults.escalations),
        ticket_created: overridden(project.ticket_created, user.ticket_created, &defaults.ticket_created),
        ticket_escalated: overridden(project.ticket_escalated, user.ticket_escalated, &defaults.ticket_escalated),
        ticket_status: overridden(project.ticket_status, user.ticket_status, &defaults.ticket_status),
        ticket_not_found: overridden(project.ticket_not_found, user.ticket_not_found, &defaults.ticket_not_found),
        ticket_closed: overridden(project.ticket_closed, user.ticket_closed, &defaults.ticket_closed),
        ticket_id_missing: overridden(project.ticket_id_missing, user.ticket_id_missing, &defaults.ticket_id_missing),
        ticket_offer: overridden(project.ticket_offer, user.ticket_offer, &defaults.ticket_offer),
        ticket_offer_declined: overridden(project.ticket_offer_declined, user.ticket_offer_declined, &defaults.ticket_offer_declined),
        no_issue: overridden(project.no_issue, user.no_issue, &defaults.no_issue),
        no_tickets: overridden(project.no_tickets, user.no_tickets, &defaults.no_tickets),
        turn_failed: overridden(project.turn_failed, user.turn_failed, &defaults.turn_failed),
    }
}

fn overridden<T: PartialEq>(project: T, user: T, default: &T) -> T {
    if project != *default {
        project
    } else {
        user
    }
}

fn expand_config_paths(config: &mut Config) {
    for path in [
        &mut config.support.knowledge_file,
        &mut config.eliza.rules_file,
    ]
    .into_iter()
    .flatten()
    {
        *path = shellexpand::tilde(path.as_str()).into_owned();
        debug!("Expanded data file path: {}", path);
    }
}

fn validate_config(config: &Config) -> Result<()> {
    info!("Validating final configuration...");
    let support = &config.support;
    if support.bot_name.trim().is_empty() || config.eliza.bot_name.trim().is_empty() {
        return Err(anyhow!(ParleyError::Config(
            "Bot names cannot be empty.".to_string()
        )));
    }
    if support.default_user_name.trim().is_empty() {
        return Err(anyhow!(ParleyError::Config(
            "support.default_user_name cannot be empty.".to_string()
        )));
    }
    if support.ticket_prefix.is_empty()
        || !support
            .ticket_prefix
            .chars()
            .all(|c| c.is_ascii_alphanumeric())
    {
        return Err(anyhow!(ParleyError::Config(format!(
            "Invalid ticket prefix '{}'. Expected ASCII letters and digits only.",
            support.ticket_prefix
        ))));
    }
    if support.offer_ticket_after == 0 {
        return Err(anyhow!(ParleyError::Config(
            "support.offer_ticket_after must be at least 1.".to_string()
        )));
    }
    for (key, file) in [
        ("support.knowledge_file", &support.knowledge_file),
        ("eliza.rules_file", &config.eliza.rules_file),
    ] {
        if let Some(file) = file {
            let path = Path::new(file);
            if !path.is_file() {
                return Err(anyhow!(ParleyError::Config(format!(
                    "Configured {} '{}' does not exist or is not a file.",
                    key,
                    path.display()
                ))));
            }
        }
    }
    support.messages.validate()?;
    info!("Configuration validation successful.");
    Ok(())
}
