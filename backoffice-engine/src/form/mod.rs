//! Form values engine.
//!
//! A [`FormValues`] holds one record of field values, the set of fields the
//! user has touched, and the validation errors for the current values.

mod event;
mod state;

pub use event::ChangeEvent;
pub use state::FormValues;

/// A form's value bag: field name to value.
pub type Values = serde_json::Map<String, serde_json::Value>;
