//! Trening Tracker - persistence core for a workout tracking app
//!
//! This library stores exercises, workouts, sets, workout plans and body
//! measurements in an embedded SQLite database, exports and restores JSON
//! backups, and keeps user preferences in a small JSON file.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path management
//! - `error`: Custom error types
//! - `logging`: `tracing` subscriber setup
//! - `models`: Core data models and joined views
//! - `storage`: SQLite schema, data-access objects and live subscriptions
//! - `repository`: Per-entity repositories over the data-access layer
//! - `backup`: Backup export and restore
//! - `preferences`: User preferences store
//! - `reports`: Chart-ready progression and measurement series
//! - `app`: The [`Tracker`] composition root
//!
//! # Example
//!
//! ```rust,ignore
//! use trening_tracker::{config::TrackerPaths, models::Exercise, Tracker};
//!
//! let tracker = Tracker::open(TrackerPaths::new()?)?;
//! let squat = tracker.repositories.exercises.insert(&Exercise::new("Squat", true))?;
//! let backup = tracker.backup_manager().save_backup_to_file()?;
//! ```

pub mod app;
pub mod backup;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod preferences;
pub mod reports;
pub mod repository;
pub mod storage;

pub use app::Tracker;
pub use error::{TrackerError, TrackerResult};
