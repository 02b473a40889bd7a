//! Error types for the export rule engine.
//!
//! Every variant aborts the current export. Keys that match no rule or no
//! title are not errors; they are skipped with a warning.

use thiserror::Error;

/// Errors that can occur while compiling an export configuration or
/// evaluating result documents against it.
#[derive(Debug, Error)]
pub enum ExportError {
    /// A rule or title pattern is not a valid regular expression.
    #[error("Invalid {owner} pattern '{pattern}': {source}")]
    InvalidPattern {
        /// Either "rule" or "title"
        owner: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A result value's JSON type disagrees with the matching rule's kind.
    #[error("Rule {kind} expects type {expected} on key '{key}', found {found}")]
    TypeMismatch {
        kind: String,
        expected: &'static str,
        found: &'static str,
        key: String,
    },

    /// A rule declares a kind that is not one of the known rule kinds.
    #[error("Invalid export rule type '{0}'")]
    InvalidRuleType(String),

    /// A rule's `for` selector could not be resolved to a row.
    #[error("Invalid for selector '{selector}' on {subject}: {reason}")]
    InvalidForSelector {
        selector: String,
        /// The rule pattern or the result key being resolved
        subject: String,
        reason: String,
    },

    /// A key or sort column does not refer to a declared title.
    #[error("Invalid {role} column {index}: only {title_count} title(s) declared")]
    InvalidColumn {
        /// Either "key" or "sort"
        role: &'static str,
        index: usize,
        title_count: usize,
    },

    /// The group size must allow at least one row.
    #[error("Invalid group size {0}: must be at least 1")]
    InvalidGroupSize(usize),

    /// A result document is not a flat JSON object.
    #[error("Result document must be a JSON object, found {0}")]
    NotAnObject(&'static str),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Name of a JSON value's type, as used in error messages.
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
