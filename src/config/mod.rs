// src/config/mod.rs
//! Run settings: where the adaptive state, output logs and rule table live.
//!
//! Resolution order per setting: explicit override (CLI) > env var > default.
//! Env vars may also come from a `.env` file loaded by the binary.

pub mod rules;

use std::path::PathBuf;

use crate::config::rules::RuleTable;
use crate::error::Result;

// --- env defaults & names ---
pub const DEFAULT_STATE_PATH: &str = "adaptive_config.json";
pub const DEFAULT_LOG_DIR: &str = "logs";

pub const ENV_STATE_PATH: &str = "SPAM_FILTER_STATE_PATH";
pub const ENV_LOG_DIR: &str = "SPAM_FILTER_LOG_DIR";
pub const ENV_RULES_PATH: &str = "SPAM_FILTER_RULES_PATH";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub state_path: PathBuf,
    pub log_dir: PathBuf,
    /// `None` means the embedded rule table.
    pub rules_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            state_path: PathBuf::from(DEFAULT_STATE_PATH),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            rules_path: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            state_path: env_path(ENV_STATE_PATH).unwrap_or(d.state_path),
            log_dir: env_path(ENV_LOG_DIR).unwrap_or(d.log_dir),
            rules_path: env_path(ENV_RULES_PATH),
        }
    }

    /// Apply explicit overrides; `None` keeps the current value.
    pub fn with_overrides(
        mut self,
        state_path: Option<PathBuf>,
        log_dir: Option<PathBuf>,
        rules_path: Option<PathBuf>,
    ) -> Self {
        if let Some(p) = state_path {
            self.state_path = p;
        }
        if let Some(p) = log_dir {
            self.log_dir = p;
        }
        if rules_path.is_some() {
            self.rules_path = rules_path;
        }
        self
    }

    pub fn load_rule_table(&self) -> Result<RuleTable> {
        match &self.rules_path {
            Some(p) => RuleTable::from_path(p),
            None => RuleTable::builtin(),
        }
    }
}

// Blank values count as unset.
fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}
