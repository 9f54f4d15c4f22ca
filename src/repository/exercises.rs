//! Exercise repository

use std::sync::Arc;

use crate::error::TrackerResult;
use crate::models::{Exercise, ExerciseId, ExerciseWithHistory};
use crate::storage::{Database, ExerciseDao, Subscription};

/// Repository for exercises
#[derive(Debug, Clone)]
pub struct ExerciseRepository {
    dao: ExerciseDao,
}

impl ExerciseRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            dao: ExerciseDao::new(db),
        }
    }

    pub fn watch_all_active(&self) -> Subscription<Vec<Exercise>> {
        self.dao.watch_all_active()
    }

    pub fn get_all_active(&self) -> TrackerResult<Vec<Exercise>> {
        self.dao.get_all_active()
    }

    /// Includes deactivated exercises
    pub fn get_all(&self) -> TrackerResult<Vec<Exercise>> {
        self.dao.get_all()
    }

    pub fn get_by_id(&self, id: ExerciseId) -> TrackerResult<Option<Exercise>> {
        self.dao.get_by_id(id)
    }

    pub fn get_with_history(&self, id: ExerciseId) -> TrackerResult<Option<ExerciseWithHistory>> {
        self.dao.get_with_history(id)
    }

    /// Case-insensitive name match over active exercises
    pub fn search(&self, query: &str) -> TrackerResult<Vec<Exercise>> {
        self.dao.search(query)
    }

    pub fn watch_search(&self, query: &str) -> Subscription<Vec<Exercise>> {
        self.dao.watch_search(query)
    }

    pub fn insert(&self, exercise: &Exercise) -> TrackerResult<ExerciseId> {
        self.dao.insert(exercise)
    }

    pub fn update(&self, exercise: &Exercise) -> TrackerResult<()> {
        self.dao.update(exercise)
    }

    pub fn delete(&self, exercise: &Exercise) -> TrackerResult<()> {
        self.dao.delete(exercise)
    }

    pub fn deactivate(&self, id: ExerciseId) -> TrackerResult<()> {
        self.dao.deactivate(id)
    }
}
