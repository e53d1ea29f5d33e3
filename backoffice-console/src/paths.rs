//! Where the console keeps its configuration and log file.
//!
//! Both live under the platform's per-user directories for the
//! `backoffice/console` project. Without a home directory the console falls
//! back to files in the working directory.

use std::path::PathBuf;

use directories::ProjectDirs;

const CONFIG_FILE: &str = "config.json";
const LOG_FILE: &str = "latest.log";
const LOCAL_LOG_FILE: &str = "backoffice-console.log";

fn project() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "backoffice", "console")
}

/// `config.json` in the user config directory, or in the working directory.
pub fn config_file() -> PathBuf {
    locate(project().map(|dirs| dirs.config_dir().to_path_buf()), CONFIG_FILE, CONFIG_FILE)
}

/// `latest.log` in the user cache directory, or a named log file in the
/// working directory.
pub fn log_file() -> PathBuf {
    locate(project().map(|dirs| dirs.cache_dir().to_path_buf()), LOG_FILE, LOCAL_LOG_FILE)
}

fn locate(dir: Option<PathBuf>, name: &str, local: &str) -> PathBuf {
    match dir {
        Some(dir) => dir.join(name),
        None => PathBuf::from(local),
    }
}
