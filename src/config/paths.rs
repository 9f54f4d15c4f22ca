//! Path management for the tracker
//!
//! Resolves where the database, preferences and backups live.
//!
//! ## Path Resolution Order
//!
//! 1. `TRENING_TRACKER_DATA_DIR` environment variable (if set)
//! 2. The platform data directory from `directories::ProjectDirs`
//!    (e.g. `~/.local/share/trening-tracker` on Linux)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::TrackerError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "TRENING_TRACKER_DATA_DIR";

/// Manages all paths used by the tracker
#[derive(Debug, Clone)]
pub struct TrackerPaths {
    /// Base directory for all app-private data
    base_dir: PathBuf,
}

impl TrackerPaths {
    /// Create a new TrackerPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no platform data directory can be determined.
    pub fn new() -> Result<Self, TrackerError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create TrackerPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the backup directory (`<base>/backups/`)
    pub fn backup_dir(&self) -> PathBuf {
        self.base_dir.join("backups")
    }

    /// Get the path to the SQLite database
    pub fn database_file(&self) -> PathBuf {
        self.base_dir.join("workout_database.sqlite")
    }

    /// Get the path to the preferences file
    pub fn preferences_file(&self) -> PathBuf {
        self.base_dir.join("user_preferences.json")
    }

    /// Ensure the base and backup directories exist
    pub fn ensure_directories(&self) -> Result<(), TrackerError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| TrackerError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.backup_dir())
            .map_err(|e| TrackerError::Io(format!("Failed to create backup directory: {}", e)))?;

        Ok(())
    }
}

fn resolve_default_path() -> Result<PathBuf, TrackerError> {
    ProjectDirs::from("com", "treningtracker", "trening-tracker")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| TrackerError::Config("Could not determine a data directory".into()))
}
