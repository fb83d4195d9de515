//! Path resolution for focusdeck configuration and data files.
//!
//! All focusdeck data is stored in `~/.focusdeck/` unless `FOCUSDECK_HOME`
//! points somewhere else:
//! - `config.yaml` - Main configuration file
//! - `focusdeck.db` - SQLite database for tasks, sessions, goals, notes, settings
//! - `logs/` - Log files
//! - `exports/` - Note exports

use std::path::PathBuf;

use crate::error::FocusdeckError;

/// Environment variable overriding the data root.
pub const HOME_ENV: &str = "FOCUSDECK_HOME";

/// Paths to focusdeck configuration and data directories.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.focusdeck/`
    pub root: PathBuf,
    /// Config file: `~/.focusdeck/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.focusdeck/focusdeck.db`
    pub database: PathBuf,
    /// Logs directory: `~/.focusdeck/logs/`
    pub logs: PathBuf,
    /// Exports directory: `~/.focusdeck/exports/`
    pub exports: PathBuf,
}

impl Paths {
    /// Resolve paths from `FOCUSDECK_HOME`, falling back to the home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if neither variable is set.
    pub fn new() -> Result<Self, FocusdeckError> {
        if let Some(root) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_root(PathBuf::from(root)));
        }

        let home = std::env::var("HOME").map_err(|_| {
            FocusdeckError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".focusdeck")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("focusdeck.db"),
            logs: root.join("logs"),
            exports: root.join("exports"),
            root,
        }
    }

    /// Ensure all directories exist, creating them if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), FocusdeckError> {
        for dir in [&self.root, &self.logs, &self.exports] {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    FocusdeckError::Config(format!(
                        "Failed to create directory {}: {e}",
                        dir.display()
                    ))
                })?;
            }
        }

        Ok(())
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| Self::with_root(PathBuf::from(".focusdeck")))
    }
}
