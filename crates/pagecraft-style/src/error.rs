//! Error types for the style engine.
//!
//! Most authoring mistakes are recovered locally and reported through
//! [`Diagnostics`](crate::diagnostics::Diagnostics) instead. The variants
//! here cover caller errors that would break an invariant of the rule store,
//! plus configuration loading.

use std::path::PathBuf;

use crate::rules::{RuleId, SheetId};

/// Result type alias for style operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the style engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A rule was inserted directly with an id that is already in use.
    #[error("Rule id '{0}' is already in use")]
    DuplicateRuleId(RuleId),

    /// A rule id does not name any rule in the store.
    #[error("No rule with id '{0}'")]
    RuleNotFound(RuleId),

    /// A sheet id does not name any sheet in the store.
    #[error("No sheet with id '{0}'")]
    UnknownSheet(SheetId),

    /// A sheet was added with an id that is already in use.
    #[error("Sheet id '{0}' is already in use")]
    DuplicateSheet(SheetId),

    /// Selector text could not be turned into a selector.
    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    /// A variant condition had an empty dimension or value.
    #[error("Invalid condition '{dimension}={value}': {message}")]
    InvalidCondition {
        dimension: String,
        value: String,
        message: String,
    },

    /// Engine configuration could not be parsed.
    #[error("Invalid engine configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// File I/O error.
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a selector error.
    pub fn invalid_selector(selector: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSelector {
            selector: selector.into(),
            message: message.into(),
        }
    }

    /// Create a condition error.
    pub fn invalid_condition(
        dimension: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidCondition {
            dimension: dimension.into(),
            value: value.into(),
            message: message.into(),
        }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
