//! Back-office console: search pages composed from the engine's form and
//! table, backed by a [`source::DataSource`].

pub mod config;
pub mod error;
pub mod fixtures;
pub mod logging;
pub mod page;
pub mod paths;
pub mod source;
