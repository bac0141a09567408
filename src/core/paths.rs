//! Platform directories. Only the cache directory is used, for the TUI log file.

use std::path::PathBuf;

use crate::core::app;

/// Project directories from the standard platform locations.
pub fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("io", app::VENDOR, app::NAME)
}

/// Cache directory (~/.cache/helpai/).
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|d| d.cache_dir().to_path_buf())
}

/// Log file written while the TUI owns the terminal. Creates the cache directory if needed.
pub fn log_file() -> Option<PathBuf> {
    let dir = cache_dir()?;
    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("could not create {}: {}", dir.display(), e);
        return None;
    }
    Some(dir.join(format!("{}.log", app::NAME)))
}
