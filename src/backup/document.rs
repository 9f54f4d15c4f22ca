//! Backup document format
//!
//! A single JSON object with camelCase keys holding every collection the
//! app exports. Collections missing from an input document read as empty.
//! Workouts are informational on input: an entry that does not parse is
//! dropped instead of failing the whole document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::models::{BodyMeasurement, Exercise, WorkoutPlanWithExercises, WorkoutWithExercises};

/// Version string written into every export
pub const APP_VERSION: &str = "1.0";

/// Full data snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupData {
    #[serde(default)]
    pub exercises: Vec<Exercise>,

    #[serde(default, deserialize_with = "lenient_workouts")]
    pub workouts: Vec<WorkoutWithExercises>,

    #[serde(default)]
    pub workout_plans: Vec<WorkoutPlanWithExercises>,

    #[serde(default)]
    pub body_measurements: Vec<BodyMeasurement>,

    /// Epoch milliseconds when the snapshot was taken
    #[serde(default)]
    pub export_date: i64,

    #[serde(default)]
    pub app_version: String,
}

impl BackupData {
    /// When the snapshot was taken, if recorded
    pub fn export_time(&self) -> Option<DateTime<Utc>> {
        if self.export_date <= 0 {
            return None;
        }
        DateTime::from_timestamp_millis(self.export_date)
    }

    /// Rows a restore would try to import (exercises, measurements, plans)
    pub fn restorable_items(&self) -> usize {
        self.exercises.len() + self.body_measurements.len() + self.workout_plans.len()
    }
}

fn lenient_workouts<'de, D>(deserializer: D) -> Result<Vec<WorkoutWithExercises>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default();
    let total = raw.len();

    let workouts: Vec<WorkoutWithExercises> = raw
        .into_iter()
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect();

    if workouts.len() < total {
        warn!(
            dropped = total - workouts.len(),
            "Ignored unreadable workouts in backup document"
        );
    }
    Ok(workouts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_parses() {
        let data: BackupData = serde_json::from_str("{}").unwrap();
        assert!(data.exercises.is_empty());
        assert!(data.workouts.is_empty());
        assert_eq!(data.export_time(), None);
        assert_eq!(data.restorable_items(), 0);
    }

    #[test]
    fn test_top_level_keys() {
        let data = BackupData {
            exercises: Vec::new(),
            workouts: Vec::new(),
            workout_plans: Vec::new(),
            body_measurements: Vec::new(),
            export_date: 1_735_689_600_000,
            app_version: APP_VERSION.into(),
        };

        let json = serde_json::to_value(&data).unwrap();
        let object = json.as_object().unwrap();
        for key in [
            "exercises",
            "workouts",
            "workoutPlans",
            "bodyMeasurements",
            "exportDate",
            "appVersion",
        ] {
            assert!(object.contains_key(key), "missing {key}");
        }
        assert_eq!(json["appVersion"], "1.0");
    }

    #[test]
    fn test_nested_null_fields_may_be_omitted() {
        let json = r#"{
            "exercises": [{"name": "Pull-up", "usesWeight": false, "createdAt": 1700000000000}],
            "workouts": [{
                "workout": {"name": "Back", "date": 1700000000000, "startTime": 1700000000000},
                "workoutExercises": [{
                    "workoutExercise": {"id": 1, "workoutId": 1, "exerciseId": 1, "orderIndex": 0},
                    "exercise": {"id": 1, "name": "Pull-up", "usesWeight": false, "createdAt": 1700000000000},
                    "sets": [{"workoutExerciseId": 1, "setNumber": 1, "reps": 8}]
                }]
            }],
            "bodyMeasurements": [{"date": 1700000000000, "weight": 78.2}]
        }"#;

        let data: BackupData = serde_json::from_str(json).unwrap();
        let workout = &data.workouts[0];
        assert!(workout.workout.end_time.is_none());
        assert_eq!(workout.workout_exercises[0].sets[0].weight, None);
        assert_eq!(data.body_measurements[0].waist, None);
        assert!(data.exercises[0].is_active);
    }

    #[test]
    fn test_unreadable_workouts_are_dropped() {
        let json = r#"{
            "workouts": [
                {"workout": {"name": "Old", "date": 1700000000000}},
                {"workout": {"name": "Push", "date": 1700000000000, "startTime": 1700000000000}},
                "not a workout"
            ]
        }"#;

        let data: BackupData = serde_json::from_str(json).unwrap();
        assert_eq!(data.workouts.len(), 1);
        assert_eq!(data.workouts[0].workout.name, "Push");
    }

    #[test]
    fn test_null_workouts_read_as_empty() {
        let data: BackupData = serde_json::from_str(r#"{"workouts": null}"#).unwrap();
        assert!(data.workouts.is_empty());
    }

    #[test]
    fn test_missing_primitives_take_defaults() {
        let json = r#"{
            "exercises": [{"name": "Deadlift"}],
            "workoutPlans": [{
                "workoutPlan": {"name": "Pull"},
                "planExercises": [{
                    "workoutPlanExercise": {},
                    "exercise": {"name": "Deadlift"}
                }]
            }],
            "bodyMeasurements": [{"weight": 80.0}]
        }"#;

        let data: BackupData = serde_json::from_str(json).unwrap();
        assert!(!data.exercises[0].uses_weight);
        let slot = &data.workout_plans[0].plan_exercises[0].workout_plan_exercise;
        assert_eq!(slot.order_index, 0);
        assert_eq!(slot.suggested_sets, 3);
        assert_eq!(data.body_measurements[0].date.timestamp_millis(), 0);
    }
}
