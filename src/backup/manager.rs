//! Backup manager
//!
//! Exports the store to a backup document, writes it into the backup
//! directory and lists what is there. Files are named by their local
//! creation time, so name order is chronological.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, Utc};
use tracing::{debug, info};

use super::document::{BackupData, APP_VERSION};
use crate::error::{TrackerError, TrackerResult};
use crate::preferences::PreferencesStore;
use crate::repository::Repositories;

/// Prefix shared by every backup file name
pub const BACKUP_FILE_PREFIX: &str = "trening_tracker_backup_";

const BACKUP_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Creates and enumerates backups
#[derive(Debug, Clone)]
pub struct BackupManager {
    repos: Repositories,
    backup_dir: PathBuf,
}

impl BackupManager {
    pub fn new(repos: Repositories, backup_dir: impl Into<PathBuf>) -> Self {
        Self {
            repos,
            backup_dir: backup_dir.into(),
        }
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Snapshot of all exercises (including inactive), all workouts, active
    /// plans and all body measurements
    pub fn create_backup(&self) -> TrackerResult<BackupData> {
        let data = BackupData {
            exercises: self.repos.exercises.get_all()?,
            workouts: self.repos.workouts.get_all_with_exercises()?,
            workout_plans: self.repos.plans.get_all_active_with_exercises()?,
            body_measurements: self.repos.measurements.get_all()?,
            export_date: Utc::now().timestamp_millis(),
            app_version: APP_VERSION.to_string(),
        };

        debug!(
            exercises = data.exercises.len(),
            workouts = data.workouts.len(),
            plans = data.workout_plans.len(),
            measurements = data.body_measurements.len(),
            "Created backup snapshot"
        );
        Ok(data)
    }

    /// Snapshot rendered as pretty-printed JSON
    pub fn export_to_json(&self) -> TrackerResult<String> {
        let data = self.create_backup()?;
        serde_json::to_string_pretty(&data)
            .map_err(|e| TrackerError::Json(format!("Failed to serialize backup: {}", e)))
    }

    /// Write a new backup file and return its path
    pub fn save_backup_to_file(&self) -> TrackerResult<PathBuf> {
        let json = self.export_to_json()?;

        fs::create_dir_all(&self.backup_dir).map_err(|e| {
            TrackerError::Io(format!("Failed to create backup directory: {}", e))
        })?;

        let filename = backup_file_name(Local::now());
        let backup_path = self.backup_dir.join(filename);

        fs::write(&backup_path, json)
            .map_err(|e| TrackerError::Io(format!("Failed to write backup file: {}", e)))?;

        info!(path = %backup_path.display(), "Backup created");
        Ok(backup_path)
    }

    /// Save a backup and record its time as the last backup
    pub fn save_backup_and_record(&self, preferences: &PreferencesStore) -> TrackerResult<PathBuf> {
        let path = self.save_backup_to_file()?;
        preferences.update_last_backup(Utc::now().timestamp_millis())?;
        Ok(path)
    }

    /// Save a backup only if automatic backups are on and one is due at `now`
    pub fn backup_if_due(
        &self,
        preferences: &PreferencesStore,
        now: DateTime<Utc>,
    ) -> TrackerResult<Option<PathBuf>> {
        if !preferences.snapshot().is_backup_due(now) {
            debug!("No automatic backup due");
            return Ok(None);
        }
        self.save_backup_and_record(preferences).map(Some)
    }

    /// JSON files in the backup directory, newest first. Empty if the directory is missing.
    pub fn get_backup_files(&self) -> TrackerResult<Vec<PathBuf>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(&self.backup_dir).map_err(|e| {
            TrackerError::Io(format!("Failed to read backup directory: {}", e))
        })? {
            let entry = entry
                .map_err(|e| TrackerError::Io(format!("Failed to read directory entry: {}", e)))?;

            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                files.push(path);
            }
        }

        files.sort_by(|a, b| b.file_name().cmp(&a.file_name()));
        Ok(files)
    }

    /// The most recent backup file, if any
    pub fn latest_backup(&self) -> TrackerResult<Option<PathBuf>> {
        Ok(self.get_backup_files()?.into_iter().next())
    }
}

fn backup_file_name(at: DateTime<Local>) -> String {
    format!(
        "{}{}.json",
        BACKUP_FILE_PREFIX,
        at.format(BACKUP_TIMESTAMP_FORMAT)
    )
}
