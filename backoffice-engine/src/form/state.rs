//! Form values state.

use std::collections::BTreeMap;
use std::sync::Arc;

use log::{debug, trace, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{FormError, SchemaError};
use crate::state::State;
use crate::validation::{FieldErrors, Schema};

use super::event::ChangeEvent;
use super::Values;

/// Internal state for a form.
#[derive(Debug, Default)]
struct FormInner {
    values: Values,
    /// Absent means untouched.
    touched: BTreeMap<String, bool>,
    /// Schema errors merged with external errors; never an empty map.
    errors: Option<FieldErrors>,
    external_errors: Option<FieldErrors>,
}

impl FormInner {
    /// Re-run the schema and rebuild the merged errors. On failure the
    /// previous errors are kept.
    fn revalidate(&mut self, schema: Option<&dyn Schema>) -> Result<(), SchemaError> {
        let schema_errors = match schema {
            Some(schema) => schema.validate(&self.values)?,
            None => None,
        };
        self.errors = FieldErrors::merge(schema_errors, self.external_errors.as_ref());
        trace!("Form errors recomputed: {:?}", self.errors);
        Ok(())
    }

    fn set_field(&mut self, name: String, value: Value, touch: bool) {
        if touch {
            self.touched.insert(name.clone(), true);
        }
        self.values.insert(name, value);
    }
}

/// Values, touched flags and validation errors for one form.
///
/// Every mutating call applies its change and re-runs the schema before it
/// returns, so [`errors`](Self::errors) always reflects the current values.
/// `errors` is `None` whenever there is nothing to report.
///
/// Accessors hand out copies of the value bag, never a reference into it.
/// A clone of `FormValues` is a handle to the same form, in the way a
/// `TableHandle` is a handle to its table: changes made through one are
/// seen through the other. Use [`values`](Self::values) and
/// [`FormValues::new`] to start an independent form.
///
/// # Example
///
/// ```
/// use backoffice_engine::form::{ChangeEvent, FormValues, Values};
/// use backoffice_engine::validation::Validator;
///
/// let schema = Validator::new().field("name").required("Name is required").build();
/// let form = FormValues::with_schema(Values::new(), schema).unwrap();
/// assert!(form.errors().is_some());
///
/// form.update_any_value(ChangeEvent::text("name", "Acme Bank")).unwrap();
/// assert!(form.errors().is_none());
/// assert!(form.is_touched("name"));
/// ```
pub struct FormValues {
    state: State<FormInner>,
    schema: Option<Arc<dyn Schema>>,
}

impl FormValues {
    /// Create a form without a schema.
    pub fn new(initial: Values) -> Self {
        Self {
            state: State::new(FormInner {
                values: initial,
                ..FormInner::default()
            }),
            schema: None,
        }
    }

    /// Create a form validated by `schema`. The initial values are
    /// validated immediately.
    pub fn with_schema(initial: Values, schema: impl Schema + 'static) -> Result<Self, FormError> {
        let form = Self {
            schema: Some(Arc::new(schema)),
            ..Self::new(initial)
        };
        form.revalidate()?;
        form.state.clear_dirty();
        Ok(form)
    }

    /// Create a form from any record that serializes to an object.
    pub fn from_record<T: Serialize>(record: &T) -> Result<Self, FormError> {
        Ok(Self::new(to_values(record)?))
    }

    /// Attach a schema and validate the current values.
    pub fn schema(mut self, schema: impl Schema + 'static) -> Result<Self, FormError> {
        self.schema = Some(Arc::new(schema));
        self.revalidate()?;
        Ok(self)
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// A copy of the current values.
    pub fn values(&self) -> Values {
        self.state.read(|inner| inner.values.clone())
    }

    /// A copy of one field's value.
    pub fn value(&self, name: &str) -> Option<Value> {
        self.state.read(|inner| inner.values.get(name).cloned())
    }

    /// The current values as a typed record.
    pub fn values_as<T: DeserializeOwned>(&self) -> Result<T, FormError> {
        let values = self.values();
        Ok(serde_json::from_value(Value::Object(values))?)
    }

    /// A copy of the touched flags. Fields never touched are absent.
    pub fn touched(&self) -> BTreeMap<String, bool> {
        self.state.read(|inner| inner.touched.clone())
    }

    pub fn is_touched(&self, name: &str) -> bool {
        self.state
            .read(|inner| inner.touched.get(name).copied().unwrap_or(false))
    }

    /// Merged schema and external errors, `None` when there are none.
    pub fn errors(&self) -> Option<FieldErrors> {
        self.state.read(|inner| inner.errors.clone())
    }

    pub fn error(&self, name: &str) -> Option<String> {
        self.state.read(|inner| {
            inner
                .errors
                .as_ref()
                .and_then(|errors| errors.get(name))
                .map(str::to_owned)
        })
    }

    pub fn has_errors(&self) -> bool {
        self.state.read(|inner| inner.errors.is_some())
    }

    /// Error for a field only once the user has touched it.
    pub fn visible_error(&self, name: &str) -> Option<String> {
        if self.is_touched(name) {
            self.error(name)
        } else {
            None
        }
    }

    pub fn external_errors(&self) -> Option<FieldErrors> {
        self.state.read(|inner| inner.external_errors.clone())
    }

    pub fn is_dirty(&self) -> bool {
        self.state.is_dirty()
    }

    pub fn clear_dirty(&self) {
        self.state.clear_dirty();
    }

    // -------------------------------------------------------------------------
    // Updates
    // -------------------------------------------------------------------------

    /// Apply a change event and mark the field touched.
    ///
    /// `forced_name` overrides the event's own name. An event with neither
    /// is rejected with [`FormError::MissingFieldName`] and changes nothing.
    pub fn update_value(
        &self,
        event: ChangeEvent,
        forced_name: Option<&str>,
    ) -> Result<(), FormError> {
        let Some(name) = forced_name.or(event.name()).map(str::to_owned) else {
            if cfg!(debug_assertions) {
                warn!("Change event without a field name ignored: {:?}", event);
            }
            return Err(FormError::MissingFieldName);
        };
        let value = event.field_value();
        debug!("Form field '{}' changed", name);
        self.mutate(|inner| inner.set_field(name, value, true))
    }

    /// [`update_value`](Self::update_value) without a forced name.
    pub fn update_any_value(&self, event: ChangeEvent) -> Result<(), FormError> {
        self.update_value(event, None)
    }

    /// Set a field directly and mark it touched.
    pub fn update_value_by_name(
        &self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<(), FormError> {
        let name = name.into();
        let value = value.into();
        self.mutate(|inner| inner.set_field(name, value, true))
    }

    /// Set a field from a dropdown selection. Does not mark it touched.
    pub fn update_dropdown_value(
        &self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<(), FormError> {
        let name = name.into();
        let value = value.into();
        self.mutate(|inner| inner.set_field(name, value, false))
    }

    /// Replace all values (with an empty record when `None`) and clear every
    /// touched flag.
    pub fn reset_values(&self, values: Option<Values>) -> Result<(), FormError> {
        debug!("Form reset");
        self.mutate(|inner| {
            inner.values = values.unwrap_or_default();
            inner.touched.clear();
        })
    }

    /// Replace all values from a typed record and clear touched flags.
    pub fn reset_to_record<T: Serialize>(&self, record: &T) -> Result<(), FormError> {
        self.reset_values(Some(to_values(record)?))
    }

    /// Replace the errors injected from outside the schema.
    pub fn set_external_errors(&self, errors: Option<FieldErrors>) -> Result<(), FormError> {
        self.mutate(|inner| inner.external_errors = errors.and_then(FieldErrors::into_option))
    }

    /// Re-run the schema against the current values.
    pub fn revalidate(&self) -> Result<(), FormError> {
        self.mutate(|_| {})
    }

    /// Apply `f` and revalidate under one lock. A schema failure is
    /// returned after the change has been applied.
    fn mutate(&self, f: impl FnOnce(&mut FormInner)) -> Result<(), FormError> {
        let schema = self.schema.as_deref();
        self.state.update(|inner| {
            f(inner);
            inner.revalidate(schema)
        })?;
        Ok(())
    }
}

fn to_values<T: Serialize>(record: &T) -> Result<Values, FormError> {
    match serde_json::to_value(record)? {
        Value::Object(values) => Ok(values),
        Value::Null => Err(FormError::NotAnObject("null")),
        Value::Bool(_) => Err(FormError::NotAnObject("bool")),
        Value::Number(_) => Err(FormError::NotAnObject("number")),
        Value::String(_) => Err(FormError::NotAnObject("string")),
        Value::Array(_) => Err(FormError::NotAnObject("array")),
    }
}

/// Another handle to the same form.
impl Clone for FormValues {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            schema: self.schema.clone(),
        }
    }
}

impl Default for FormValues {
    fn default() -> Self {
        Self::new(Values::new())
    }
}

impl std::fmt::Debug for FormValues {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormValues")
            .field("state", &self.state)
            .field("schema", &self.schema.is_some())
            .finish()
    }
}
