//! Paginated table engine.
//!
//! The table provides:
//! - Column descriptors with dotted-path accessors and custom renderers
//! - Page index and page size state with a fixed set of allowed sizes
//! - A sync callback fired once per pager interaction
//! - An imperative [`TableHandle`] for the owning page
//! - Headless rendering into a [`TableView`]
//!
//! # Example
//!
//! ```
//! use std::sync::mpsc;
//!
//! use backoffice_engine::table::{Column, PagerAction, PaginatedTable};
//! use serde_json::json;
//!
//! let (tx, rx) = mpsc::channel();
//! let table = PaginatedTable::new(vec![
//!     Column::new("Name", "name"),
//!     Column::new("Amount", "amount"),
//! ])
//! .with_key_field("id")
//! .with_total_record_count(23)
//! .with_rows(vec![json!({ "id": 1, "name": "Acme", "amount": 1250000 })])
//! .on_sync(move |index, size| {
//!     let _ = tx.send((index, size));
//! });
//!
//! table.dispatch(PagerAction::SetPageSize(25));
//! assert_eq!(rx.try_recv(), Ok((0, 25)));
//!
//! let view = table.render();
//! assert_eq!(view.rows[0].cells, vec!["Acme", "1,250,000"]);
//! ```

mod column;
mod events;
mod handle;
mod pager;
mod render;
mod state;

pub use column::{CellRenderer, Column, HeaderRenderer};
pub use handle::TableHandle;
pub use pager::{ChangeOrigin, PageChange, Pager, PagerAction};
pub use render::{PagerView, RenderedRow, RowKey, TableView};
pub use state::{PaginatedTable, SyncCallback, TableId};
