//! Paginated table state.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::config::{MountSync, TableConfig};
use crate::error::{ConfigError, TableError};
use crate::path::FieldPath;
use crate::state::State;

use super::column::Column;
use super::handle::TableHandle;
use super::pager::{ChangeOrigin, Pager};

/// Callback invoked with `(page_index, page_size)` when the table needs data.
pub type SyncCallback = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// Unique identifier for a table instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(usize);

impl TableId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__table_{}", self.0)
    }
}

/// Internal state for a paginated table.
#[derive(Debug)]
pub(crate) struct TableInner {
    pub columns: Vec<Column>,
    pub rows: Vec<Value>,
    pub key_field: Option<FieldPath>,
    pub loading: bool,
    pub pager: Pager,
    pub mount_sync: MountSync,
    pub mounted: bool,
    pub warn_on_keys: bool,
    /// Origin of the most recent page change.
    pub last_origin: Option<ChangeOrigin>,
    /// Set while the sync callback for an Internal change is running.
    pub syncing: bool,
}

/// A paginated table over tree-shaped row records.
///
/// The table owns its page index and page size. Pager interactions go
/// through [`dispatch`](Self::dispatch) and request fresh data through the
/// sync callback; the owning page reads and forces pagination through a
/// [`TableHandle`] and pushes fetched rows back with the setters below.
///
/// ```
/// use std::sync::{Arc, Mutex};
///
/// use backoffice_engine::table::{Column, PagerAction, PaginatedTable};
///
/// let calls = Arc::new(Mutex::new(Vec::new()));
/// let seen = Arc::clone(&calls);
/// let table = PaginatedTable::new(vec![Column::new("Name", "name")])
///     .with_total_record_count(23)
///     .on_sync(move |index, size| seen.lock().unwrap().push((index, size)));
///
/// table.dispatch(PagerAction::Next);
/// table.handle().set_page_index(0);
/// assert_eq!(*calls.lock().unwrap(), vec![(1, 10)]);
/// ```
pub struct PaginatedTable {
    id: TableId,
    pub(super) state: State<TableInner>,
    pub(super) on_sync: Option<SyncCallback>,
    pub(super) key_warned: Arc<AtomicBool>,
}

impl PaginatedTable {
    /// Create an empty table with the default configuration.
    pub fn new(columns: Vec<Column>) -> Self {
        Self::build(columns, &TableConfig::default())
    }

    /// Create an empty table with a validated configuration.
    pub fn with_config(columns: Vec<Column>, config: &TableConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(columns, config))
    }

    fn build(columns: Vec<Column>, config: &TableConfig) -> Self {
        Self {
            id: TableId::new(),
            state: State::new(TableInner {
                columns,
                rows: Vec::new(),
                key_field: None,
                loading: false,
                pager: Pager::new(config),
                mount_sync: config.mount_sync,
                mounted: false,
                warn_on_keys: config.warn_on_keys,
                last_origin: None,
                syncing: false,
            }),
            on_sync: None,
            key_warned: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Set the initial rows.
    pub fn with_rows(self, rows: Vec<Value>) -> Self {
        self.set_rows(rows);
        self
    }

    /// Set the initial server-reported total.
    pub fn with_total_record_count(self, total: usize) -> Self {
        self.set_total_record_count(total);
        self
    }

    /// Set the initial loading flag.
    pub fn with_loading(self, loading: bool) -> Self {
        self.set_loading(loading);
        self
    }

    /// Use the value at `path` as each row's key.
    pub fn with_key_field(self, path: impl Into<FieldPath>) -> Self {
        let path = path.into();
        self.state.update(|inner| inner.key_field = Some(path));
        self
    }

    /// Fire one `(0, page_size)` sync the first time the table is mounted.
    pub fn without_pre_loading(self) -> Self {
        self.state.update(|inner| inner.mount_sync = MountSync::Immediate);
        self
    }

    /// Register the sync callback.
    pub fn on_sync<F>(mut self, callback: F) -> Self
    where
        F: Fn(usize, usize) + Send + Sync + 'static,
    {
        self.on_sync = Some(Arc::new(callback));
        self
    }

    pub fn id(&self) -> TableId {
        self.id
    }

    pub fn id_string(&self) -> String {
        self.id.to_string()
    }

    /// A read/write handle for the owning page.
    pub fn handle(&self) -> TableHandle {
        TableHandle::new(self.state.clone())
    }

    // -------------------------------------------------------------------------
    // Data
    // -------------------------------------------------------------------------

    pub fn columns(&self) -> Vec<Column> {
        self.state.read(|inner| inner.columns.clone())
    }

    pub fn rows(&self) -> Vec<Value> {
        self.state.read(|inner| inner.rows.clone())
    }

    pub fn len(&self) -> usize {
        self.state.read(|inner| inner.rows.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replace the displayed rows.
    pub fn set_rows(&self, rows: Vec<Value>) {
        self.state.update(|inner| inner.rows = rows);
    }

    /// Replace the displayed rows with serialized records.
    pub fn set_records<T: Serialize>(&self, records: &[T]) -> Result<(), TableError> {
        let rows = records
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        self.set_rows(rows);
        Ok(())
    }

    pub fn total_record_count(&self) -> usize {
        self.state.read(|inner| inner.pager.total_record_count())
    }

    pub fn set_total_record_count(&self, total: usize) {
        self.state
            .update(|inner| inner.pager.set_total_record_count(total));
    }

    pub fn is_loading(&self) -> bool {
        self.state.read(|inner| inner.loading)
    }

    pub fn set_loading(&self, loading: bool) {
        self.state.update(|inner| inner.loading = loading);
    }

    // -------------------------------------------------------------------------
    // Pagination
    // -------------------------------------------------------------------------

    pub fn page_index(&self) -> usize {
        self.state.read(|inner| inner.pager.page_index())
    }

    pub fn page_size(&self) -> usize {
        self.state.read(|inner| inner.pager.page_size())
    }

    /// A snapshot of the pager.
    pub fn pager(&self) -> Pager {
        self.state.read(|inner| inner.pager.clone())
    }

    /// Origin of the most recent page change, if any.
    pub fn last_change_origin(&self) -> Option<ChangeOrigin> {
        self.state.read(|inner| inner.last_origin)
    }

    /// Whether a sync callback is currently running.
    pub fn is_syncing(&self) -> bool {
        self.state.read(|inner| inner.syncing)
    }

    /// Check if the table has changed since the last render.
    pub fn is_dirty(&self) -> bool {
        self.state.is_dirty()
    }

    pub fn clear_dirty(&self) {
        self.state.clear_dirty();
    }
}

impl std::fmt::Debug for PaginatedTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginatedTable")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("on_sync", &self.on_sync.is_some())
            .finish()
    }
}
