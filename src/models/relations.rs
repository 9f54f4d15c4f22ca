//! Joined read views
//!
//! Composite shapes assembled by the data-access layer for detail views and
//! for the backup document.

use serde::{Deserialize, Serialize};

use super::exercise::Exercise;
use super::plan::{WorkoutPlan, WorkoutPlanExercise};
use super::workout::{ExerciseSet, Workout, WorkoutExercise};

/// A workout with its exercises (ordered by `order_index`) and their sets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutWithExercises {
    pub workout: Workout,
    #[serde(default)]
    pub workout_exercises: Vec<WorkoutExerciseWithDetails>,
}

impl WorkoutWithExercises {
    /// Total number of sets across all exercises
    pub fn total_sets(&self) -> usize {
        self.workout_exercises.iter().map(|we| we.sets.len()).sum()
    }

    /// Sum of weight x reps across all sets
    pub fn total_volume(&self) -> f64 {
        self.workout_exercises
            .iter()
            .flat_map(|we| we.sets.iter())
            .map(ExerciseSet::volume)
            .sum()
    }
}

/// A workout exercise with its resolved exercise and ordered sets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutExerciseWithDetails {
    pub workout_exercise: WorkoutExercise,
    pub exercise: Exercise,
    #[serde(default)]
    pub sets: Vec<ExerciseSet>,
}

/// A plan with its exercise slots (ordered by `order_index`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlanWithExercises {
    pub workout_plan: WorkoutPlan,
    #[serde(default)]
    pub plan_exercises: Vec<WorkoutPlanExerciseWithDetails>,
}

/// A plan slot with its resolved exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlanExerciseWithDetails {
    pub workout_plan_exercise: WorkoutPlanExercise,
    pub exercise: Exercise,
}

/// An exercise with every workout entry that used it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseWithHistory {
    pub exercise: Exercise,
    #[serde(default)]
    pub workout_exercises: Vec<WorkoutExerciseWithSets>,
}

/// A workout exercise with its ordered sets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutExerciseWithSets {
    pub workout_exercise: WorkoutExercise,
    #[serde(default)]
    pub sets: Vec<ExerciseSet>,
}
