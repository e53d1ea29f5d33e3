//! Schema trait for form validation.

use crate::error::SchemaError;
use crate::form::Values;

use super::FieldErrors;

/// Validates a value bag into per-field messages.
///
/// Returns `Ok(None)` (or an empty map) when every field is valid, and
/// `Err` only when the evaluator itself cannot run.
pub trait Schema: Send + Sync {
    fn validate(&self, values: &Values) -> Result<Option<FieldErrors>, SchemaError>;
}

impl<F> Schema for F
where
    F: Fn(&Values) -> Result<Option<FieldErrors>, SchemaError> + Send + Sync,
{
    fn validate(&self, values: &Values) -> Result<Option<FieldErrors>, SchemaError> {
        self(values)
    }
}
