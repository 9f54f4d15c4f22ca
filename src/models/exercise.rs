//! Exercise model
//!
//! An exercise is a named movement ("Squat", "Pull-up") that workouts and
//! plans refer to. Exercises are never hard-deleted from history; they are
//! deactivated instead.

use chrono::serde::ts_milliseconds;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ExerciseId;
use super::{current_timestamp, default_true};

/// A trackable exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    /// Row id (`0` until inserted)
    #[serde(default)]
    pub id: ExerciseId,

    /// Display name; unique by convention only
    pub name: String,

    /// Whether weight fields are meaningful for this exercise
    #[serde(default)]
    pub uses_weight: bool,

    /// When the exercise was created
    #[serde(with = "ts_milliseconds", default = "current_timestamp")]
    pub created_at: DateTime<Utc>,

    /// Soft-delete flag
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Exercise {
    /// Create a new, unsaved, active exercise
    pub fn new(name: impl Into<String>, uses_weight: bool) -> Self {
        Self {
            id: ExerciseId::UNSAVED,
            name: name.into(),
            uses_weight,
            created_at: current_timestamp(),
            is_active: true,
        }
    }

    /// Hide this exercise from active listings
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    /// Copy of this exercise with its id cleared, ready for insertion as a new row
    pub fn as_new(&self) -> Self {
        Self {
            id: ExerciseId::UNSAVED,
            ..self.clone()
        }
    }

    /// Validate the exercise
    pub fn validate(&self) -> Result<(), ExerciseValidationError> {
        if self.name.trim().is_empty() {
            return Err(ExerciseValidationError::EmptyName);
        }

        if self.name.len() > 100 {
            return Err(ExerciseValidationError::NameTooLong(self.name.len()));
        }

        Ok(())
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_active {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} (inactive)", self.name)
        }
    }
}

/// Validation errors for exercises
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExerciseValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for ExerciseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Exercise name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Exercise name too long ({} chars, max 100)", len)
            }
        }
    }
}

impl std::error::Error for ExerciseValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_exercise() {
        let exercise = Exercise::new("Squat", true);
        assert_eq!(exercise.name, "Squat");
        assert!(exercise.uses_weight);
        assert!(exercise.is_active);
        assert!(exercise.id.is_unsaved());
    }

    #[test]
    fn test_deactivate() {
        let mut exercise = Exercise::new("Plank", false);
        exercise.deactivate();
        assert!(!exercise.is_active);
        assert_eq!(exercise.to_string(), "Plank (inactive)");
    }

    #[test]
    fn test_validation() {
        let mut exercise = Exercise::new("Bench Press", true);
        assert!(exercise.validate().is_ok());

        exercise.name = "   ".into();
        assert_eq!(exercise.validate(), Err(ExerciseValidationError::EmptyName));

        exercise.name = "x".repeat(101);
        assert_eq!(
            exercise.validate(),
            Err(ExerciseValidationError::NameTooLong(101))
        );
    }

    #[test]
    fn test_json_field_names() {
        let mut exercise = Exercise::new("Deadlift", true);
        exercise.id = ExerciseId::new(5);
        let json = serde_json::to_value(&exercise).unwrap();

        assert_eq!(json["id"], 5);
        assert_eq!(json["usesWeight"], true);
        assert_eq!(json["isActive"], true);
        assert_eq!(json["createdAt"], exercise.created_at.timestamp_millis());
    }

    #[test]
    fn test_missing_optional_fields_take_defaults() {
        let exercise: Exercise =
            serde_json::from_str(r#"{"name":"Deadlift","usesWeight":true}"#).unwrap();
        assert!(exercise.id.is_unsaved());
        assert!(exercise.is_active);
    }
}
