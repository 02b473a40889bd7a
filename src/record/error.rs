//! Error types for record scripts

use thiserror::Error;

/// Errors raised while running one process of a record script.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("Invalid record type '{0}'")]
    InvalidProcessType(String),

    #[error("Invalid display type '{0}'")]
    InvalidDisplayType(String),

    #[error("Invalid prefix level '{0}'")]
    InvalidPrefixLevel(String),

    #[error("Invalid survey prompt type '{0}'")]
    InvalidSurveyType(String),

    #[error("Invalid survey prompt value type '{0}'")]
    InvalidValueType(String),

    /// Loop options must carry a string value, used as the sub-key.
    #[error("Invalid loop option value for '{key}': expected string, found {found}")]
    InvalidLoopOptionValue { key: String, found: String },

    #[error("Selection {index} is out of range for {count} option(s)")]
    InvalidSelection { index: usize, count: usize },
}
