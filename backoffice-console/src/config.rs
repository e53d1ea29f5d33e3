//! Console configuration.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use backoffice_engine::config::TableConfig;
use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::error::ConsoleError;

/// Settings read from `config.json`. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// `off`, `error`, `warn`, `info`, `debug` or `trace`.
    pub log_level: String,
    pub table: TableConfig,
    /// Number of records in the demo data source.
    pub demo_records: usize,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            log_level: String::from("debug"),
            table: TableConfig::default(),
            demo_records: 23,
        }
    }
}

impl ConsoleConfig {
    /// Load the configuration at `path`, or `None` when there is no file.
    pub fn load(path: &Path) -> Result<Option<Self>, ConsoleError> {
        if !path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(path)?;
        Self::parse(&text).map(Some)
    }

    /// Parse and validate a configuration document.
    pub fn parse(text: &str) -> Result<Self, ConsoleError> {
        let config: Self = serde_json::from_str(text)?;
        config.table.validate()?;
        config.level_filter()?;
        Ok(config)
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConsoleError> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| ConsoleError::LogLevel(self.log_level.clone()))
    }
}
