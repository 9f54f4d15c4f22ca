//! Exercise progression
//!
//! Flattens workout history into one chart point per set of a single
//! exercise.

use chrono::{DateTime, Utc};

use crate::models::{ExerciseId, WorkoutWithExercises};

/// One set of the exercise as it appears on a progress chart
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressionPoint {
    /// Date of the workout the set belongs to
    pub date: DateTime<Utc>,
    pub weight: Option<f64>,
    pub reps: i32,
    /// Weight times reps, zero for bodyweight sets
    pub volume: f64,
}

/// Progress of one exercise across workouts
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseProgression {
    pub exercise_id: ExerciseId,
    /// Points ordered by date
    pub points: Vec<ProgressionPoint>,
}

impl ExerciseProgression {
    /// Build the progression of `exercise_id` from workout history
    pub fn generate(workouts: &[WorkoutWithExercises], exercise_id: ExerciseId) -> Self {
        let mut points: Vec<ProgressionPoint> = workouts
            .iter()
            .flat_map(|workout| {
                workout
                    .workout_exercises
                    .iter()
                    .filter(move |entry| entry.workout_exercise.exercise_id == exercise_id)
                    .flat_map(move |entry| {
                        entry.sets.iter().map(move |set| ProgressionPoint {
                            date: workout.workout.date,
                            weight: set.weight,
                            reps: set.reps,
                            volume: set.volume(),
                        })
                    })
            })
            .collect();

        points.sort_by_key(|point| point.date);

        Self {
            exercise_id,
            points,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Heaviest weight lifted in any set
    pub fn max_weight(&self) -> Option<f64> {
        self.points
            .iter()
            .filter_map(|point| point.weight)
            .fold(None, |max, w| Some(max.map_or(w, |m: f64| m.max(w))))
    }

    pub fn total_volume(&self) -> f64 {
        self.points.iter().map(|point| point.volume).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Exercise, ExerciseSet, Workout, WorkoutExercise, WorkoutExerciseId,
        WorkoutExerciseWithDetails, WorkoutId,
    };
    use chrono::TimeZone;

    fn workout(day: u32, exercise_id: ExerciseId, sets: &[(i32, Option<f64>)]) -> WorkoutWithExercises {
        let date = Utc.with_ymd_and_hms(2025, 4, day, 18, 0, 0).unwrap();
        let mut exercise = Exercise::new("Squat", true);
        exercise.id = exercise_id;
        let entry_id = WorkoutExerciseId::new(i64::from(day));

        WorkoutWithExercises {
            workout: Workout::new("Session", date),
            workout_exercises: vec![WorkoutExerciseWithDetails {
                workout_exercise: WorkoutExercise::new(WorkoutId::new(1), exercise_id, 0),
                exercise,
                sets: sets
                    .iter()
                    .enumerate()
                    .map(|(i, (reps, weight))| ExerciseSet::new(entry_id, i as i32 + 1, *reps, *weight))
                    .collect(),
            }],
        }
    }

    #[test]
    fn test_points_sorted_by_date_and_filtered() {
        let squat = ExerciseId::new(1);
        let other = ExerciseId::new(2);
        let history = vec![
            workout(10, squat, &[(5, Some(100.0))]),
            workout(3, squat, &[(8, Some(80.0)), (8, Some(85.0))]),
            workout(5, other, &[(12, None)]),
        ];

        let progression = ExerciseProgression::generate(&history, squat);
        assert_eq!(progression.points.len(), 3);
        assert_eq!(progression.points[0].volume, 640.0);
        assert_eq!(progression.points[2].weight, Some(100.0));
        assert_eq!(progression.max_weight(), Some(100.0));
        assert_eq!(progression.total_volume(), 640.0 + 680.0 + 500.0);
    }

    #[test]
    fn test_bodyweight_sets_have_zero_volume() {
        let pull_up = ExerciseId::new(3);
        let progression =
            ExerciseProgression::generate(&[workout(1, pull_up, &[(10, None)])], pull_up);

        assert_eq!(progression.points[0].volume, 0.0);
        assert_eq!(progression.max_weight(), None);
    }

    #[test]
    fn test_unknown_exercise_is_empty() {
        let progression = ExerciseProgression::generate(&[], ExerciseId::new(9));
        assert!(progression.is_empty());
    }
}
