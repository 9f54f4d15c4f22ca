//! Workout repository

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::TrackerResult;
use crate::models::{
    ExerciseSet, ExerciseSetId, Workout, WorkoutExercise, WorkoutExerciseId, WorkoutId,
    WorkoutWithExercises,
};
use crate::storage::{Database, Subscription, WorkoutDao};

/// Repository for workouts, their exercises and sets
#[derive(Debug, Clone)]
pub struct WorkoutRepository {
    dao: WorkoutDao,
}

impl WorkoutRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            dao: WorkoutDao::new(db),
        }
    }

    pub fn watch_all(&self) -> Subscription<Vec<Workout>> {
        self.dao.watch_all()
    }

    pub fn get_all(&self) -> TrackerResult<Vec<Workout>> {
        self.dao.get_all()
    }

    pub fn get_by_id(&self, id: WorkoutId) -> TrackerResult<Option<Workout>> {
        self.dao.get_by_id(id)
    }

    pub fn watch_with_exercises(&self, id: WorkoutId) -> Subscription<Option<WorkoutWithExercises>> {
        self.dao.watch_with_exercises(id)
    }

    pub fn get_with_exercises(&self, id: WorkoutId) -> TrackerResult<Option<WorkoutWithExercises>> {
        self.dao.get_with_exercises(id)
    }

    pub fn watch_all_with_exercises(&self) -> Subscription<Vec<WorkoutWithExercises>> {
        self.dao.watch_all_with_exercises()
    }

    pub fn get_all_with_exercises(&self) -> TrackerResult<Vec<WorkoutWithExercises>> {
        self.dao.get_all_with_exercises()
    }

    pub fn watch_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Subscription<Vec<Workout>> {
        self.dao.watch_by_date_range(start, end)
    }

    pub fn get_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> TrackerResult<Vec<Workout>> {
        self.dao.get_by_date_range(start, end)
    }

    pub fn count_in_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> TrackerResult<usize> {
        self.dao.count_in_range(start, end)
    }

    pub fn insert(&self, workout: &Workout) -> TrackerResult<WorkoutId> {
        self.dao.insert(workout)
    }

    pub fn update(&self, workout: &Workout) -> TrackerResult<()> {
        self.dao.update(workout)
    }

    pub fn delete(&self, workout: &Workout) -> TrackerResult<()> {
        self.dao.delete(workout)
    }

    pub fn insert_workout_exercise(
        &self,
        workout_exercise: &WorkoutExercise,
    ) -> TrackerResult<WorkoutExerciseId> {
        self.dao.insert_workout_exercise(workout_exercise)
    }

    pub fn update_workout_exercise(&self, workout_exercise: &WorkoutExercise) -> TrackerResult<()> {
        self.dao.update_workout_exercise(workout_exercise)
    }

    pub fn delete_workout_exercise(&self, workout_exercise: &WorkoutExercise) -> TrackerResult<()> {
        self.dao.delete_workout_exercise(workout_exercise)
    }

    pub fn get_sets_for_workout_exercise(
        &self,
        workout_exercise_id: WorkoutExerciseId,
    ) -> TrackerResult<Vec<ExerciseSet>> {
        self.dao.get_sets_for_workout_exercise(workout_exercise_id)
    }

    pub fn insert_set(&self, set: &ExerciseSet) -> TrackerResult<ExerciseSetId> {
        self.dao.insert_set(set)
    }

    pub fn update_set(&self, set: &ExerciseSet) -> TrackerResult<()> {
        self.dao.update_set(set)
    }

    pub fn delete_set(&self, set: &ExerciseSet) -> TrackerResult<()> {
        self.dao.delete_set(set)
    }
}
