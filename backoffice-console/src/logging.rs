//! File logging for the console.

use std::fs::{self, File};
use std::path::PathBuf;

use log::LevelFilter;
use simplelog::{Config, WriteLogger};

use crate::error::ConsoleError;
use crate::paths;

/// Start logging to the console's log file and return its path.
pub fn init(level: LevelFilter) -> Result<PathBuf, ConsoleError> {
    let path = paths::log_file();
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let file = File::create(&path)?;
    WriteLogger::init(level, Config::default(), file)?;
    Ok(path)
}
