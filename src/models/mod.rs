//! Core data models
//!
//! This module contains the entities of the workout domain (exercises,
//! workouts, sets, plans, body measurements) and the joined views built
//! from them.

pub mod exercise;
pub mod ids;
pub mod measurement;
pub mod plan;
pub mod relations;
pub mod workout;

use chrono::{DateTime, Utc};

pub use exercise::{Exercise, ExerciseValidationError};
pub use ids::{
    BodyMeasurementId, ExerciseId, ExerciseSetId, WorkoutExerciseId, WorkoutId,
    WorkoutPlanExerciseId, WorkoutPlanId,
};
pub use measurement::{BodyMeasurement, MeasurementType, MeasurementValidationError};
pub use plan::{WorkoutPlan, WorkoutPlanExercise};
pub use relations::{
    ExerciseWithHistory, WorkoutExerciseWithDetails, WorkoutExerciseWithSets,
    WorkoutPlanExerciseWithDetails, WorkoutPlanWithExercises, WorkoutWithExercises,
};
pub use workout::{ExerciseSet, Workout, WorkoutExercise};

/// Current time truncated to whole milliseconds, the precision timestamps are stored at
pub fn current_timestamp() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

fn default_true() -> bool {
    true
}
