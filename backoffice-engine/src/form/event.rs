//! Change events delivered by form inputs.

use serde_json::Value;

/// A value change coming from an input.
///
/// Native inputs carry their own `name`; custom widgets that cannot set one
/// leave it empty and the caller forces the field name instead.
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeEvent {
    /// A checkbox toggled. `value` is the checkbox's value attribute.
    Checkbox {
        name: Option<String>,
        checked: bool,
        value: Option<String>,
    },
    /// Any text-like input (text, number, select, textarea, date).
    Text { name: Option<String>, value: String },
    /// A widget that reports a structured value for a known field.
    Named { name: String, value: Value },
}

impl ChangeEvent {
    /// A checkbox event without a value attribute.
    pub fn checkbox(name: impl Into<String>, checked: bool) -> Self {
        Self::Checkbox {
            name: Some(name.into()),
            checked,
            value: None,
        }
    }

    /// A checkbox event with a value attribute.
    pub fn checkbox_with_value(
        name: impl Into<String>,
        checked: bool,
        value: impl Into<String>,
    ) -> Self {
        Self::Checkbox {
            name: Some(name.into()),
            checked,
            value: Some(value.into()),
        }
    }

    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Text {
            name: Some(name.into()),
            value: value.into(),
        }
    }

    /// A text event from a widget that has no name of its own.
    pub fn unnamed_text(value: impl Into<String>) -> Self {
        Self::Text {
            name: None,
            value: value.into(),
        }
    }

    pub fn named(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Named {
            name: name.into(),
            value: value.into(),
        }
    }

    /// The field name the event carries, if any.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Checkbox { name, .. } | Self::Text { name, .. } => name.as_deref(),
            Self::Named { name, .. } => Some(name),
        }
    }

    /// The value to store for the field.
    ///
    /// A checked checkbox stores its value attribute, or `true` when that is
    /// absent or empty; an unchecked checkbox stores `false`. Other events
    /// store their raw value.
    pub fn field_value(&self) -> Value {
        match self {
            Self::Checkbox { checked: false, .. } => Value::Bool(false),
            Self::Checkbox {
                checked: true,
                value,
                ..
            } => match value.as_deref() {
                Some(value) if !value.is_empty() => Value::String(value.to_owned()),
                _ => Value::Bool(true),
            },
            Self::Text { value, .. } => Value::String(value.clone()),
            Self::Named { value, .. } => value.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn checkbox_values() {
        assert_eq!(ChangeEvent::checkbox("active", false).field_value(), json!(false));
        assert_eq!(ChangeEvent::checkbox("active", true).field_value(), json!(true));
        assert_eq!(
            ChangeEvent::checkbox_with_value("active", true, "").field_value(),
            json!(true)
        );
        assert_eq!(
            ChangeEvent::checkbox_with_value("channel", true, "USSD").field_value(),
            json!("USSD")
        );
        assert_eq!(
            ChangeEvent::checkbox_with_value("channel", false, "USSD").field_value(),
            json!(false)
        );
    }

    #[test]
    fn names() {
        assert_eq!(ChangeEvent::text("name", "Acme").name(), Some("name"));
        assert_eq!(ChangeEvent::unnamed_text("x").name(), None);
        assert_eq!(ChangeEvent::named("limit", 5000).name(), Some("limit"));
    }

    #[test]
    fn text_and_named_values_are_raw() {
        assert_eq!(ChangeEvent::text("q", "42").field_value(), json!("42"));
        assert_eq!(
            ChangeEvent::named("bank", json!({ "id": 3 })).field_value(),
            json!({ "id": 3 })
        );
    }
}
