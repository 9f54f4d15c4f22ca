//! Backup and restore
//!
//! # Components
//!
//! - `BackupManager`: snapshots the store into a [`BackupData`] document,
//!   writes it to the backup directory and lists existing backups
//! - `RestoreManager`: validates documents and merges them back into a store
//!
//! # Backup Format
//!
//! A JSON object with camelCase keys:
//! - `exercises`: every exercise, active or not
//! - `workouts`: workouts with their exercises and sets
//! - `workoutPlans`: active plans with their exercise slots
//! - `bodyMeasurements`: every body measurement
//! - `exportDate`: epoch milliseconds
//! - `appVersion`: `"1.0"`
//!
//! Restore inserts exercises, body measurements and plans as new rows.
//! Workouts are exported for reference and are not restored.

pub mod document;
pub mod manager;
pub mod restore;

pub use document::{BackupData, APP_VERSION};
pub use manager::{BackupManager, BACKUP_FILE_PREFIX};
pub use restore::{RestoreFailureKind, RestoreManager, RestoreResult, ValidationResult};
