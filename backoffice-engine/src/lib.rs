//! State engines for the back-office console.
//!
//! Every page of the console composes two independent engines:
//! - [`table::PaginatedTable`]: page index and size, a sync callback for
//!   pager interactions, and an imperative [`table::TableHandle`]
//! - [`form::FormValues`]: a value bag with touched flags and schema errors

pub mod config;
pub mod error;
pub mod events;
pub mod form;
pub mod format;
pub mod path;
pub mod state;
pub mod table;
pub mod validation;

pub mod prelude {
    pub use crate::config::{MountSync, TableConfig};
    pub use crate::error::{ConfigError, FormError, SchemaError, TableError};
    pub use crate::events::EventResult;
    pub use crate::form::{ChangeEvent, FormValues, Values};
    pub use crate::path::FieldPath;
    pub use crate::state::State;
    pub use crate::table::{
        ChangeOrigin, Column, PagerAction, PaginatedTable, RowKey, TableHandle, TableView,
    };
    pub use crate::validation::{FieldErrors, Schema, Validator};
}
