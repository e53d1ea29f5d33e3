//! Error types

use backoffice_engine::error::{ConfigError, FormError};
use backoffice_engine::validation::FieldErrors;
use thiserror::Error;

/// Failure reported by a data source.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("data source unavailable: {0}")]
    Unavailable(String),
    #[error("session expired")]
    SessionExpired,
    #[error("page size must be greater than zero")]
    InvalidPageSize,
}

/// Console error type.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("form error: {0}")]
    Form(#[from] FormError),
    #[error("invalid table configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("search criteria are invalid: {0}")]
    InvalidCriteria(FieldErrors),
    #[error("invalid log level '{0}'")]
    LogLevel(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config file error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("logger error: {0}")]
    Logger(#[from] log::SetLoggerError),
}
