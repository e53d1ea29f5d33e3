//! Validator builder for fluent validation API.

use log::trace;
use regex::Regex;
use serde_json::Value;

use crate::error::SchemaError;
use crate::form::Values;

use super::{FieldErrors, Schema};

/// Type alias for rule closures: `(field value, whole record) -> valid`.
type Rule = Box<dyn Fn(Option<&Value>, &Values) -> bool + Send + Sync>;

/// A field and its rules, in declaration order.
struct FieldEntry {
    name: String,
    rules: Vec<(Rule, String)>,
}

/// Declarative schema over a form's value bag.
///
/// Rules run in declaration order and the first failing rule of a field
/// provides its message.
///
/// # Example
///
/// ```
/// use backoffice_engine::form::Values;
/// use backoffice_engine::validation::{Schema, Validator};
/// use serde_json::json;
///
/// let schema = Validator::new()
///     .field("name")
///         .required("Name is required")
///         .min_length(3, "Name must be at least 3 characters")
///     .field("email")
///         .email("Please enter a valid email")
///     .build();
///
/// let mut values = Values::new();
/// values.insert("name".into(), json!("Al"));
/// values.insert("email".into(), json!("ops@bank.example"));
///
/// let errors = schema.validate(&values).unwrap().unwrap();
/// assert_eq!(errors.get("name"), Some("Name must be at least 3 characters"));
/// assert!(!errors.contains("email"));
/// ```
pub struct Validator {
    fields: Vec<FieldEntry>,
    build_errors: Vec<SchemaError>,
}

impl Validator {
    /// Create a new validator.
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            build_errors: Vec::new(),
        }
    }

    /// Start declaring rules for a field.
    pub fn field(self, name: impl Into<String>) -> FieldBuilder {
        FieldBuilder {
            validator: self,
            entry: FieldEntry {
                name: name.into(),
                rules: Vec::new(),
            },
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Schema for Validator {
    fn validate(&self, values: &Values) -> Result<Option<FieldErrors>, SchemaError> {
        if let Some(error) = self.build_errors.first() {
            return Err(error.clone());
        }

        let mut errors = FieldErrors::new();
        for field in &self.fields {
            if errors.contains(&field.name) {
                continue;
            }
            let value = values.get(&field.name);
            let failed = field
                .rules
                .iter()
                .find(|(rule, _)| !rule(value, values))
                .map(|(_, message)| message);
            if let Some(message) = failed {
                trace!("Field '{}' failed validation: {}", field.name, message);
                errors.insert(field.name.clone(), message.clone());
            }
        }
        Ok(errors.into_option())
    }
}

/// Builder for adding validation rules to a single field.
pub struct FieldBuilder {
    validator: Validator,
    entry: FieldEntry,
}

impl FieldBuilder {
    /// Add a custom rule on the field value.
    pub fn rule<F>(self, f: F, msg: impl Into<String>) -> Self
    where
        F: Fn(Option<&Value>) -> bool + Send + Sync + 'static,
    {
        self.rule_with(move |value, _| f(value), msg)
    }

    /// Add a custom rule that can also look at the rest of the record.
    pub fn rule_with<F>(mut self, f: F, msg: impl Into<String>) -> Self
    where
        F: Fn(Option<&Value>, &Values) -> bool + Send + Sync + 'static,
    {
        self.entry.rules.push((Box::new(f), msg.into()));
        self
    }

    /// Require a value: not absent, not null, not a blank string, not an
    /// empty list.
    pub fn required(self, msg: impl Into<String>) -> Self {
        self.rule(
            |v| match v {
                None | Some(Value::Null) => false,
                Some(Value::String(s)) => !s.trim().is_empty(),
                Some(Value::Array(items)) => !items.is_empty(),
                Some(_) => true,
            },
            msg,
        )
    }

    /// Require minimum length (in characters). Absent values pass; use
    /// [`required`](Self::required) for presence.
    pub fn min_length(self, min: usize, msg: impl Into<String>) -> Self {
        self.rule(
            move |v| text(v).is_none_or(|s| s.chars().count() >= min),
            msg,
        )
    }

    /// Require maximum length (in characters).
    pub fn max_length(self, max: usize, msg: impl Into<String>) -> Self {
        self.rule(
            move |v| text(v).is_none_or(|s| s.chars().count() <= max),
            msg,
        )
    }

    /// Require non-empty text to match a regex pattern.
    ///
    /// A pattern that does not compile makes the whole schema fail with
    /// [`SchemaError::InvalidRule`].
    pub fn pattern(mut self, pattern: &str, msg: impl Into<String>) -> Self {
        match Regex::new(pattern) {
            Ok(re) => self.rule(
                move |v| non_empty_text(v).is_none_or(|s| re.is_match(s)),
                msg,
            ),
            Err(err) => {
                self.validator.build_errors.push(SchemaError::InvalidRule {
                    field: self.entry.name.clone(),
                    reason: err.to_string(),
                });
                self
            }
        }
    }

    /// Require a valid email address. Empty is valid.
    pub fn email(self, msg: impl Into<String>) -> Self {
        self.rule(
            |v| non_empty_text(v).is_none_or(email_address::EmailAddress::is_valid),
            msg,
        )
    }

    /// Require a checkbox value of `true`.
    pub fn checked(self, msg: impl Into<String>) -> Self {
        self.rule(|v| matches!(v, Some(Value::Bool(true))), msg)
    }

    /// Require the value, when present, to be one of `options`.
    pub fn one_of(self, options: Vec<Value>, msg: impl Into<String>) -> Self {
        self.rule(
            move |v| match v {
                None | Some(Value::Null) => true,
                Some(value) => options.contains(value),
            },
            msg,
        )
    }

    /// Require the value to equal another field's value.
    pub fn equals_field(self, other: impl Into<String>, msg: impl Into<String>) -> Self {
        let other = other.into();
        self.rule_with(move |v, values| v == values.get(&other), msg)
    }

    /// Continue to the next field.
    pub fn field(self, name: impl Into<String>) -> FieldBuilder {
        self.build().field(name)
    }

    /// Finish declaring rules and return the schema.
    pub fn build(self) -> Validator {
        let mut validator = self.validator;
        validator.fields.push(self.entry);
        validator
    }
}

fn text(value: Option<&Value>) -> Option<&str> {
    match value {
        Some(Value::String(s)) => Some(s.as_str()),
        _ => None,
    }
}

fn non_empty_text(value: Option<&Value>) -> Option<&str> {
    text(value).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn values(pairs: &[(&str, Value)]) -> Values {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn required_rejects_blank_and_missing() {
        let schema = Validator::new().field("name").required("required").build();
        assert!(schema.validate(&values(&[])).unwrap().is_some());
        assert!(schema.validate(&values(&[("name", json!("  "))])).unwrap().is_some());
        assert!(schema.validate(&values(&[("name", json!(null))])).unwrap().is_some());
        assert!(schema.validate(&values(&[("name", json!([]))])).unwrap().is_some());
        assert_eq!(schema.validate(&values(&[("name", json!("Acme"))])).unwrap(), None);
        assert_eq!(schema.validate(&values(&[("name", json!(0))])).unwrap(), None);
    }

    #[test]
    fn first_failing_rule_wins() {
        let schema = Validator::new()
            .field("code")
            .required("Code is required")
            .min_length(4, "Code is too short")
            .pattern("^[A-Z]+$", "Code must be uppercase")
            .build();
        let errors = schema
            .validate(&values(&[("code", json!("ab"))]))
            .unwrap()
            .unwrap();
        assert_eq!(errors.get("code"), Some("Code is too short"));
    }

    #[test]
    fn length_rules_count_characters() {
        let schema = Validator::new()
            .field("name")
            .max_length(3, "too long")
            .build();
        assert_eq!(schema.validate(&values(&[("name", json!("äöü"))])).unwrap(), None);
        assert!(schema.validate(&values(&[("name", json!("abcd"))])).unwrap().is_some());
    }

    #[test]
    fn invalid_pattern_fails_the_schema() {
        let schema = Validator::new().field("code").pattern("(", "bad").build();
        let err = schema.validate(&values(&[])).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidRule { ref field, .. } if field == "code"));
    }

    #[test]
    fn email_allows_empty() {
        let schema = Validator::new().field("email").email("invalid").build();
        assert_eq!(schema.validate(&values(&[("email", json!(""))])).unwrap(), None);
        assert_eq!(schema.validate(&values(&[])).unwrap(), None);
        assert!(schema
            .validate(&values(&[("email", json!("not-an-email"))]))
            .unwrap()
            .is_some());
    }

    #[test]
    fn checked_one_of_and_equals_field() {
        let schema = Validator::new()
            .field("terms")
            .checked("accept the terms")
            .field("currency")
            .one_of(vec![json!("KES"), json!("USD")], "unsupported currency")
            .field("confirm")
            .equals_field("pin", "PINs do not match")
            .build();

        let errors = schema
            .validate(&values(&[
                ("terms", json!(false)),
                ("currency", json!("EUR")),
                ("pin", json!("1234")),
                ("confirm", json!("4321")),
            ]))
            .unwrap()
            .unwrap();
        assert_eq!(errors.len(), 3);

        let ok = schema
            .validate(&values(&[
                ("terms", json!(true)),
                ("currency", json!("USD")),
                ("pin", json!("1234")),
                ("confirm", json!("1234")),
            ]))
            .unwrap();
        assert_eq!(ok, None);
    }

    #[test]
    fn closures_are_schemas() {
        let schema = |values: &Values| -> Result<Option<FieldErrors>, SchemaError> {
            if values.contains_key("boom") {
                return Err(SchemaError::evaluation("boom"));
            }
            Ok(None)
        };
        assert_eq!(schema.validate(&values(&[])), Ok(None));
        assert!(schema.validate(&values(&[("boom", json!(1))])).is_err());
    }
}
