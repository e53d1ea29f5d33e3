//! Table configuration shared by every paginated table.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Page sizes offered by the pager when nothing else is configured.
pub const DEFAULT_PAGE_SIZES: [usize; 4] = [5, 10, 25, 50];

/// Page size a new table starts with.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// What a table does the first time it is mounted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MountSync {
    /// Never sync on mount. The owning page performs the first fetch itself.
    #[default]
    Skip,
    /// Fire one `(0, page_size)` sync on the first call to `mount()`.
    Immediate,
}

/// Configuration for a paginated table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Allowed page sizes, in the order the pager offers them.
    pub page_sizes: Vec<usize>,
    /// Page size used when the table is created.
    pub default_page_size: usize,
    /// Mount behavior.
    pub mount_sync: MountSync,
    /// Emit development warnings about row keys.
    pub warn_on_keys: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_sizes: DEFAULT_PAGE_SIZES.to_vec(),
            default_page_size: DEFAULT_PAGE_SIZE,
            mount_sync: MountSync::default(),
            warn_on_keys: true,
        }
    }
}

impl TableConfig {
    /// Check that the configuration describes a usable pager.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_sizes.is_empty() {
            return Err(ConfigError::NoPageSizes);
        }
        if self.page_sizes.contains(&0) || self.default_page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        if !self.page_sizes.contains(&self.default_page_size) {
            return Err(ConfigError::DefaultNotAllowed(self.default_page_size));
        }
        Ok(())
    }

    /// Whether `size` is one of the allowed page sizes.
    pub fn allows(&self, size: usize) -> bool {
        self.page_sizes.contains(&size)
    }
}
