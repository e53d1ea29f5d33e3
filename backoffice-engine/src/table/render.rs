//! Headless rendering of a paginated table.

use std::collections::HashSet;
use std::sync::atomic::Ordering;

use log::warn;
use serde_json::Value;

use crate::format::display_value;
use crate::path::{is_falsy, FieldPath};

use super::state::{PaginatedTable, TableInner};

/// Stable identity of a rendered row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowKey {
    /// Text of the key field.
    Field(String),
    /// Position in the current page. Only stable while the caller never
    /// reorders or splices rows in place.
    Index(usize),
}

/// A row ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    pub key: RowKey,
    pub cells: Vec<String>,
}

/// Pager controls ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerView {
    pub page_index: usize,
    pub page_size: usize,
    pub page_sizes: Vec<usize>,
    pub total_record_count: usize,
    pub page_count: usize,
    pub can_previous: bool,
    pub can_next: bool,
    /// e.g. `"11-20 of 23"`.
    pub label: String,
}

/// Everything a renderer needs to draw the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub headers: Vec<String>,
    pub rows: Vec<RenderedRow>,
    pub loading: bool,
    pub pager: PagerView,
}

impl TableView {
    /// Whether there is nothing to show and nothing loading.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && !self.loading
    }
}

impl PaginatedTable {
    /// Render headers, rows and pager into plain text.
    ///
    /// Rendering never fails. Missing key configuration only produces
    /// development warnings.
    pub fn render(&self) -> TableView {
        let view = self.state.read(|inner| TableView {
            headers: inner.columns.iter().map(|c| c.render_header()).collect(),
            rows: inner
                .rows
                .iter()
                .enumerate()
                .map(|(index, row)| RenderedRow {
                    key: row_key(inner.key_field.as_ref(), row, index),
                    cells: inner.columns.iter().map(|c| c.render_cell(row)).collect(),
                })
                .collect(),
            loading: inner.loading,
            pager: pager_view(inner),
        });
        self.check_keys();
        view
    }

    /// Keys of the current rows, in display order.
    pub fn row_keys(&self) -> Vec<RowKey> {
        self.state.read(|inner| {
            inner
                .rows
                .iter()
                .enumerate()
                .map(|(index, row)| row_key(inner.key_field.as_ref(), row, index))
                .collect()
        })
    }

    /// Development-only diagnostics about row identity. Each table warns at
    /// most once.
    fn check_keys(&self) {
        if !cfg!(debug_assertions) || self.key_warned.load(Ordering::SeqCst) {
            return;
        }
        let warnings = self.state.read(key_warnings);
        if warnings.is_empty() {
            return;
        }
        self.key_warned.store(true, Ordering::SeqCst);
        for message in warnings {
            warn!("{}: {}", self.id_string(), message);
        }
    }
}

fn row_key(key_field: Option<&FieldPath>, row: &Value, index: usize) -> RowKey {
    match key_field {
        Some(path) => RowKey::Field(display_value(path.resolve(row))),
        None => RowKey::Index(index),
    }
}

fn key_warnings(inner: &TableInner) -> Vec<String> {
    if !inner.warn_on_keys || inner.rows.is_empty() {
        return Vec::new();
    }
    let Some(path) = inner.key_field.as_ref() else {
        return vec![String::from(
            "no key field set, rows are keyed by position; set a key field",
        )];
    };

    let mut warnings = Vec::new();
    if is_falsy(inner.rows.first().and_then(|row| path.resolve(row))) {
        warnings.push(format!(
            "key field '{path}' is empty on the first row; check the key field"
        ));
    }
    let mut seen = HashSet::new();
    let duplicated = inner
        .rows
        .iter()
        .map(|row| display_value(path.resolve(row)))
        .any(|key| !seen.insert(key));
    if duplicated {
        warnings.push(format!("key field '{path}' is not unique across rows"));
    }
    warnings
}

fn pager_view(inner: &TableInner) -> PagerView {
    let pager = &inner.pager;
    let label = match pager.visible_range() {
        Some((first, last)) => format!("{first}-{last} of {}", pager.total_record_count()),
        None => format!("0-0 of {}", pager.total_record_count()),
    };
    PagerView {
        page_index: pager.page_index(),
        page_size: pager.page_size(),
        page_sizes: pager.page_sizes().to_vec(),
        total_record_count: pager.total_record_count(),
        page_count: pager.page_count(),
        can_previous: pager.can_previous(),
        can_next: pager.can_next(),
        label,
    }
}
