//! Workout plan models
//!
//! A plan is a reusable template: an ordered list of exercises with
//! suggested sets, reps and weight.

use chrono::serde::ts_milliseconds;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{ExerciseId, WorkoutPlanExerciseId, WorkoutPlanId};
use super::{current_timestamp, default_true};

/// A reusable workout template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlan {
    #[serde(default)]
    pub id: WorkoutPlanId,

    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(with = "ts_milliseconds", default = "current_timestamp")]
    pub created_at: DateTime<Utc>,

    /// Soft-delete flag
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl WorkoutPlan {
    /// Create a new, unsaved, active plan
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: WorkoutPlanId::UNSAVED,
            name: name.into(),
            description: description.into(),
            created_at: current_timestamp(),
            is_active: true,
        }
    }

    /// Hide this plan from active listings
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    /// Copy of this plan with its id cleared
    pub fn as_new(&self) -> Self {
        Self {
            id: WorkoutPlanId::UNSAVED,
            ..self.clone()
        }
    }
}

pub const DEFAULT_SUGGESTED_SETS: i32 = 3;
pub const DEFAULT_SUGGESTED_REPS: i32 = 10;

fn default_suggested_sets() -> i32 {
    DEFAULT_SUGGESTED_SETS
}

fn default_suggested_reps() -> i32 {
    DEFAULT_SUGGESTED_REPS
}

/// An exercise slot within a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlanExercise {
    #[serde(default)]
    pub id: WorkoutPlanExerciseId,
    #[serde(default)]
    pub workout_plan_id: WorkoutPlanId,
    #[serde(default)]
    pub exercise_id: ExerciseId,
    #[serde(default)]
    pub order_index: i32,
    #[serde(default = "default_suggested_sets")]
    pub suggested_sets: i32,
    #[serde(default = "default_suggested_reps")]
    pub suggested_reps: i32,
    #[serde(default)]
    pub suggested_weight: Option<f64>,
}

impl WorkoutPlanExercise {
    /// Create a slot with the default 3x10 suggestion
    pub fn new(workout_plan_id: WorkoutPlanId, exercise_id: ExerciseId, order_index: i32) -> Self {
        Self {
            id: WorkoutPlanExerciseId::UNSAVED,
            workout_plan_id,
            exercise_id,
            order_index,
            suggested_sets: DEFAULT_SUGGESTED_SETS,
            suggested_reps: DEFAULT_SUGGESTED_REPS,
            suggested_weight: None,
        }
    }

    /// Override the suggested sets and reps
    pub fn with_suggestion(mut self, sets: i32, reps: i32, weight: Option<f64>) -> Self {
        self.suggested_sets = sets;
        self.suggested_reps = reps;
        self.suggested_weight = weight;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_exercise_defaults() {
        let slot = WorkoutPlanExercise::new(WorkoutPlanId::new(1), ExerciseId::new(2), 0);
        assert_eq!(slot.suggested_sets, 3);
        assert_eq!(slot.suggested_reps, 10);
        assert_eq!(slot.suggested_weight, None);
    }

    #[test]
    fn test_plan_exercise_defaults_from_json() {
        let slot: WorkoutPlanExercise = serde_json::from_str(
            r#"{"workoutPlanId":1,"exerciseId":2,"orderIndex":0}"#,
        )
        .unwrap();
        assert_eq!(slot.suggested_sets, 3);
        assert_eq!(slot.suggested_reps, 10);
    }

    #[test]
    fn test_as_new_clears_id() {
        let mut plan = WorkoutPlan::new("Push Pull Legs", "3-day split");
        plan.id = WorkoutPlanId::new(9);
        let copy = plan.as_new();
        assert!(copy.id.is_unsaved());
        assert_eq!(copy.name, plan.name);
        assert_eq!(copy.created_at, plan.created_at);
    }
}
