//! Custom error types for the tracker core
//!
//! This module defines the error hierarchy for the crate using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for tracker operations
#[derive(Error, Debug)]
pub enum TrackerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Caller-side input checks
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// A row referenced a parent that does not exist
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// Any other failure reported by the embedded store
    #[error("Database error: {0}")]
    Database(String),

    /// Storage errors (locks, atomic writes)
    #[error("Storage error: {0}")]
    Storage(String),
}

impl TrackerError {
    /// Create a "not found" error for exercises
    pub fn exercise_not_found(identifier: impl ToString) -> Self {
        Self::NotFound {
            entity_type: "Exercise",
            identifier: identifier.to_string(),
        }
    }

    /// Create a "not found" error for workouts
    pub fn workout_not_found(identifier: impl ToString) -> Self {
        Self::NotFound {
            entity_type: "Workout",
            identifier: identifier.to_string(),
        }
    }

    /// Create a "not found" error for workout plans
    pub fn workout_plan_not_found(identifier: impl ToString) -> Self {
        Self::NotFound {
            entity_type: "WorkoutPlan",
            identifier: identifier.to_string(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a foreign key violation
    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(self, Self::ForeignKeyViolation(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for TrackerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<rusqlite::Error> for TrackerError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _)
                if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY =>
            {
                Self::ForeignKeyViolation(err.to_string())
            }
            _ => Self::Database(err.to_string()),
        }
    }
}

/// Result type alias for tracker operations
pub type TrackerResult<T> = Result<T, TrackerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TrackerError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = TrackerError::exercise_not_found(42);
        assert_eq!(err.to_string(), "Exercise not found: 42");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let tracker_err: TrackerError = io_err.into();
        assert!(matches!(tracker_err, TrackerError::Io(_)));
    }

    #[test]
    fn test_from_foreign_key_failure() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             CREATE TABLE parent (id INTEGER PRIMARY KEY);
             CREATE TABLE child (id INTEGER PRIMARY KEY, parent_id INTEGER NOT NULL REFERENCES parent(id));",
        )
        .unwrap();

        let err = conn
            .execute("INSERT INTO child (parent_id) VALUES (99)", [])
            .unwrap_err();
        let tracker_err: TrackerError = err.into();
        assert!(tracker_err.is_foreign_key_violation());
    }

    #[test]
    fn test_other_sqlite_failure_is_database_error() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let err = conn.execute("SELECT * FROM missing_table", []).unwrap_err();
        let tracker_err: TrackerError = err.into();
        assert!(matches!(tracker_err, TrackerError::Database(_)));
    }
}
