//! Error types for the spam filter.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for filter operations
pub type Result<T> = std::result::Result<T, FilterError>;

/// Filter error types
#[derive(Error, Debug)]
pub enum FilterError {
    /// The chat log to classify could not be opened
    #[error("File '{}' not found", path.display())]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line of the chat log could not be read (e.g. invalid UTF-8)
    #[error("failed to read {} at line {line}: {source}", path.display())]
    InputRead {
        path: PathBuf,
        line: usize,
        #[source]
        source: std::io::Error,
    },

    /// The persisted adaptive state exists but cannot be decoded
    #[error("adaptive state at {} is malformed: {source}", path.display())]
    MalformedState {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A rule in the rule table failed to compile
    #[error("category `{category}` rule `{pattern}` is invalid: {source}")]
    InvalidRule {
        category: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The rule table itself is malformed
    #[error("rule table error: {0}")]
    RuleConfig(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for FilterError {
    fn from(e: toml::de::Error) -> Self {
        FilterError::RuleConfig(e.to_string())
    }
}
