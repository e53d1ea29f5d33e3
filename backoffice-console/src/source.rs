//! Data sources behind the search pages.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use backoffice_engine::form::Values;
use backoffice_engine::format::display_value;
use backoffice_engine::path;
use log::debug;
use serde_json::Value;

use crate::error::FetchError;

/// One page request. `page_number` is one-based.
#[derive(Debug, Clone, PartialEq)]
pub struct PageQuery {
    pub page_number: usize,
    pub page_size: usize,
    pub filters: Values,
}

impl PageQuery {
    /// Build a query from the table's zero-based page index.
    pub fn from_index(page_index: usize, page_size: usize, filters: Values) -> Self {
        Self {
            page_number: page_index.saturating_add(1),
            page_size,
            filters,
        }
    }
}

/// One page of results as confirmed by the source.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult {
    pub rows: Vec<Value>,
    pub total_count: usize,
    /// The one-based page actually returned.
    pub page_number: usize,
}

/// Fetches filtered, paginated records.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch(&self, query: PageQuery) -> Result<PageResult, FetchError>;
}

/// A data source over records held in memory.
///
/// Filters match when the record's value at the filter's path contains the
/// filter text (case-insensitive). Empty, null and `false` filters are
/// ignored. A page past the end is answered with the last page.
#[derive(Debug, Default)]
pub struct InMemorySource {
    records: Vec<Value>,
    fetches: AtomicUsize,
}

impl InMemorySource {
    pub fn new(records: Vec<Value>) -> Self {
        Self {
            records,
            fetches: AtomicUsize::new(0),
        }
    }

    /// Number of fetches served so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    fn matches(record: &Value, filters: &Values) -> bool {
        filters.iter().all(|(field, filter)| {
            let wanted = match filter {
                Value::Null | Value::Bool(false) => return true,
                Value::String(s) if s.trim().is_empty() => return true,
                Value::String(s) => s.trim().to_lowercase(),
                other => display_value(Some(other)).to_lowercase(),
            };
            display_value(path::resolve(record, field))
                .to_lowercase()
                .contains(&wanted)
        })
    }
}

#[async_trait]
impl DataSource for InMemorySource {
    async fn fetch(&self, query: PageQuery) -> Result<PageResult, FetchError> {
        if query.page_size == 0 {
            return Err(FetchError::InvalidPageSize);
        }
        self.fetches.fetch_add(1, Ordering::SeqCst);

        let matching: Vec<&Value> = self
            .records
            .iter()
            .filter(|record| Self::matches(record, &query.filters))
            .collect();
        let total_count = matching.len();
        let last_page = total_count.div_ceil(query.page_size).max(1);
        let page_number = query.page_number.clamp(1, last_page);
        let rows = matching
            .into_iter()
            .skip((page_number - 1) * query.page_size)
            .take(query.page_size)
            .cloned()
            .collect();

        debug!(
            "Fetched page {} of {} ({} records match)",
            page_number, last_page, total_count
        );
        Ok(PageResult {
            rows,
            total_count,
            page_number,
        })
    }
}
