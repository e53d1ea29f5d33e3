//! Error types

use thiserror::Error;

/// A schema could not evaluate a value bag.
///
/// This is distinct from a validation failure: a violated rule is reported as
/// a per-field message, while a `SchemaError` means the evaluator itself
/// could not run.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// A rule was declared with an argument that cannot be used (for example
    /// a regex that does not compile).
    #[error("invalid rule for field '{field}': {reason}")]
    InvalidRule { field: String, reason: String },
    /// The evaluator failed while running.
    #[error("schema evaluation failed: {0}")]
    Evaluation(String),
}

impl SchemaError {
    /// Creates an evaluation failure with a message.
    pub fn evaluation(message: impl Into<String>) -> Self {
        Self::Evaluation(message.into())
    }
}

/// Errors reported by a [`FormValues`](crate::form::FormValues) operation.
#[derive(Debug, Error)]
pub enum FormError {
    /// The schema could not be evaluated after a change. The change itself
    /// has been applied.
    #[error(transparent)]
    Schema(#[from] SchemaError),
    /// A change event carried no field name and none was forced.
    #[error("change event has no field name")]
    MissingFieldName,
    /// Typed values could not be converted to or from the value bag.
    #[error("form values serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// Typed initial values did not serialize into a record.
    #[error("form values must serialize to an object, got {0}")]
    NotAnObject(&'static str),
}

/// Errors reported while loading rows into a table.
#[derive(Debug, Error)]
pub enum TableError {
    /// A row could not be converted into a record.
    #[error("row serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Invalid table configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("at least one page size must be allowed")]
    NoPageSizes,
    #[error("page size must be greater than zero")]
    ZeroPageSize,
    #[error("default page size {0} is not one of the allowed page sizes")]
    DefaultNotAllowed(usize),
}
