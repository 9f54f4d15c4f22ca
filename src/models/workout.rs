//! Workout models
//!
//! A workout is one training session. It owns an ordered list of workout
//! exercises, each of which owns its sets.

use chrono::serde::{ts_milliseconds, ts_milliseconds_option};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{ExerciseId, ExerciseSetId, WorkoutExerciseId, WorkoutId};

/// A training session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    #[serde(default)]
    pub id: WorkoutId,

    pub name: String,

    /// Calendar anchor used for listing and charts
    #[serde(with = "ts_milliseconds")]
    pub date: DateTime<Utc>,

    #[serde(with = "ts_milliseconds")]
    pub start_time: DateTime<Utc>,

    /// `None` while the workout is still in progress
    #[serde(with = "ts_milliseconds_option", default)]
    pub end_time: Option<DateTime<Utc>>,

    #[serde(default)]
    pub notes: String,
}

impl Workout {
    /// Start a new, unsaved workout at `start`
    pub fn new(name: impl Into<String>, start: DateTime<Utc>) -> Self {
        Self {
            id: WorkoutId::UNSAVED,
            name: name.into(),
            date: start,
            start_time: start,
            end_time: None,
            notes: String::new(),
        }
    }

    /// Whether the workout has not been finished yet
    pub fn is_in_progress(&self) -> bool {
        self.end_time.is_none()
    }

    /// Mark the workout as finished
    pub fn finish(&mut self, end: DateTime<Utc>) {
        self.end_time = Some(end);
    }

    /// Elapsed time between start and end, if finished
    pub fn duration(&self) -> Option<chrono::Duration> {
        self.end_time.map(|end| end - self.start_time)
    }
}

/// An exercise performed as part of a workout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutExercise {
    #[serde(default)]
    pub id: WorkoutExerciseId,
    pub workout_id: WorkoutId,
    pub exercise_id: ExerciseId,
    /// Zero-based position within the workout
    pub order_index: i32,
}

impl WorkoutExercise {
    pub fn new(workout_id: WorkoutId, exercise_id: ExerciseId, order_index: i32) -> Self {
        Self {
            id: WorkoutExerciseId::UNSAVED,
            workout_id,
            exercise_id,
            order_index,
        }
    }
}

/// One set of an exercise within a workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseSet {
    #[serde(default)]
    pub id: ExerciseSetId,
    pub workout_exercise_id: WorkoutExerciseId,
    /// One-based position within the exercise
    pub set_number: i32,
    pub reps: i32,
    /// `None` for bodyweight-only sets
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub is_completed: bool,
    /// Rest after the set, in seconds
    #[serde(default)]
    pub rest_time: Option<i32>,
}

impl ExerciseSet {
    /// Create a new, unsaved, not yet completed set
    pub fn new(
        workout_exercise_id: WorkoutExerciseId,
        set_number: i32,
        reps: i32,
        weight: Option<f64>,
    ) -> Self {
        Self {
            id: ExerciseSetId::UNSAVED,
            workout_exercise_id,
            set_number,
            reps,
            weight,
            is_completed: false,
            rest_time: None,
        }
    }

    /// Weight times reps; bodyweight sets count as zero
    pub fn volume(&self) -> f64 {
        self.weight.unwrap_or(0.0) * f64::from(self.reps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_workout_lifecycle() {
        let start = Utc.with_ymd_and_hms(2025, 3, 1, 18, 0, 0).unwrap();
        let mut workout = Workout::new("Leg Day", start);
        assert!(workout.is_in_progress());
        assert!(workout.duration().is_none());

        workout.finish(start + chrono::Duration::minutes(75));
        assert!(!workout.is_in_progress());
        assert_eq!(workout.duration(), Some(chrono::Duration::minutes(75)));
    }

    #[test]
    fn test_set_volume() {
        let set = ExerciseSet::new(WorkoutExerciseId::new(1), 1, 10, Some(60.0));
        assert_eq!(set.volume(), 600.0);

        let bodyweight = ExerciseSet::new(WorkoutExerciseId::new(1), 2, 12, None);
        assert_eq!(bodyweight.volume(), 0.0);
    }

    #[test]
    fn test_workout_json_uses_epoch_millis() {
        let start = Utc.with_ymd_and_hms(2025, 3, 1, 18, 0, 0).unwrap();
        let workout = Workout::new("Push", start);
        let json = serde_json::to_value(&workout).unwrap();

        assert_eq!(json["startTime"], start.timestamp_millis());
        assert!(json["endTime"].is_null());
    }

    #[test]
    fn test_set_without_nullable_fields_parses() {
        let set: ExerciseSet =
            serde_json::from_str(r#"{"workoutExerciseId":3,"setNumber":1,"reps":8}"#).unwrap();
        assert_eq!(set.weight, None);
        assert_eq!(set.rest_time, None);
        assert!(!set.is_completed);
    }
}
