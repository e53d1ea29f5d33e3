//! Column descriptors.

use std::sync::Arc;

use serde_json::Value;

use crate::format::{display_value, format_amount, is_amount_field};
use crate::path::FieldPath;

/// Custom cell renderer: `(extracted value, full row) -> text`.
pub type CellRenderer = Arc<dyn Fn(Option<&Value>, &Value) -> String + Send + Sync>;

/// Custom header renderer: `(column name) -> text`.
pub type HeaderRenderer = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// A table column definition.
///
/// ```
/// use backoffice_engine::table::Column;
/// use serde_json::json;
///
/// let country = Column::new("Country", "institution.country.name");
/// let row = json!({ "institution": { "country": { "name": "Ghana" } } });
/// assert_eq!(country.render_cell(&row), "Ghana");
/// ```
#[derive(Clone)]
pub struct Column {
    /// Display name shown in the header.
    pub name: String,
    /// Dotted path into each row.
    pub accessor: FieldPath,
    cell: Option<CellRenderer>,
    header: Option<HeaderRenderer>,
    amount: bool,
}

impl Column {
    /// Create a column. Paths ending in an amount field get amount formatting.
    pub fn new(name: impl Into<String>, accessor: impl Into<FieldPath>) -> Self {
        let accessor = accessor.into();
        let amount = accessor.leaf().is_some_and(is_amount_field);
        Self {
            name: name.into(),
            accessor,
            cell: None,
            header: None,
            amount,
        }
    }

    /// Render cells with a custom function instead of the default text.
    pub fn cell<F>(mut self, render: F) -> Self
    where
        F: Fn(Option<&Value>, &Value) -> String + Send + Sync + 'static,
    {
        self.cell = Some(Arc::new(render));
        self
    }

    /// Render the header with a custom function instead of the name.
    pub fn header<F>(mut self, render: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.header = Some(Arc::new(render));
        self
    }

    /// Force amount formatting on or off.
    pub fn amount(mut self, amount: bool) -> Self {
        self.amount = amount;
        self
    }

    /// Whether cells are rendered as amounts.
    pub fn is_amount(&self) -> bool {
        self.amount
    }

    /// Header text.
    pub fn render_header(&self) -> String {
        match &self.header {
            Some(render) => render(&self.name),
            None => self.name.clone(),
        }
    }

    /// Cell text for `row`. A custom renderer takes precedence over amount
    /// formatting.
    pub fn render_cell(&self, row: &Value) -> String {
        let value = self.accessor.resolve(row);
        match &self.cell {
            Some(render) => render(value, row),
            None if self.amount => format_amount(value),
            None => display_value(value),
        }
    }
}

impl std::fmt::Debug for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("name", &self.name)
            .field("accessor", &self.accessor)
            .field("custom_cell", &self.cell.is_some())
            .field("custom_header", &self.header.is_some())
            .field("amount", &self.amount)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn amount_columns_are_detected_by_leaf() {
        assert!(Column::new("Amount", "transaction.amount").is_amount());
        assert!(!Column::new("Name", "name").is_amount());
        assert!(!Column::new("Amount", "amount").amount(false).is_amount());
    }

    #[test]
    fn custom_cell_receives_value_and_row() {
        let column = Column::new("Status", "active").cell(|value, row| {
            let label = if value == Some(&json!(true)) { "Active" } else { "Inactive" };
            format!("{label} ({})", row["code"].as_str().unwrap_or_default())
        });
        let row = json!({ "active": true, "code": "BR-01" });
        assert_eq!(column.render_cell(&row), "Active (BR-01)");
    }

    #[test]
    fn custom_header() {
        let column = Column::new("Limit", "limit").header(|name| name.to_uppercase());
        assert_eq!(column.render_header(), "LIMIT");
    }

    #[test]
    fn missing_path_renders_empty() {
        let column = Column::new("Bank", "bank.name");
        assert_eq!(column.render_cell(&json!({ "id": 1 })), "");
    }
}
