//! Composition root
//!
//! [`Tracker`] opens the database and preferences under one base directory
//! and hands out repositories and backup managers wired to them.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::backup::{BackupManager, RestoreManager};
use crate::config::TrackerPaths;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{
    Exercise, ExerciseId, WorkoutId, WorkoutPlanId, WorkoutPlanWithExercises, WorkoutWithExercises,
};
use crate::preferences::PreferencesStore;
use crate::repository::Repositories;
use crate::storage::Database;

/// Everything the app needs, built from one set of paths
#[derive(Debug)]
pub struct Tracker {
    paths: TrackerPaths,
    database: Arc<Database>,
    pub repositories: Repositories,
    pub preferences: PreferencesStore,
}

impl Tracker {
    /// Open (or create) the store under `paths`
    pub fn open(paths: TrackerPaths) -> TrackerResult<Self> {
        paths.ensure_directories()?;
        let database = Arc::new(Database::open(paths.database_file())?);
        Self::assemble(paths, database)
    }

    /// Keep the database in memory; preferences and backups still use `base_dir`
    pub fn open_in_memory(base_dir: impl Into<PathBuf>) -> TrackerResult<Self> {
        let paths = TrackerPaths::with_base_dir(base_dir.into());
        paths.ensure_directories()?;
        let database = Arc::new(Database::open_in_memory()?);
        Self::assemble(paths, database)
    }

    fn assemble(paths: TrackerPaths, database: Arc<Database>) -> TrackerResult<Self> {
        let preferences = PreferencesStore::open(paths.preferences_file())?;
        info!(base_dir = %paths.base_dir().display(), "Tracker ready");

        Ok(Self {
            repositories: Repositories::new(database.clone()),
            preferences,
            database,
            paths,
        })
    }

    pub fn paths(&self) -> &TrackerPaths {
        &self.paths
    }

    pub fn database(&self) -> &Arc<Database> {
        &self.database
    }

    pub fn backup_manager(&self) -> BackupManager {
        BackupManager::new(self.repositories.clone(), self.paths.backup_dir())
    }

    pub fn restore_manager(&self) -> RestoreManager {
        RestoreManager::new(self.repositories.clone())
    }

    /// Look up an exercise that must exist
    pub fn require_exercise(&self, id: ExerciseId) -> TrackerResult<Exercise> {
        self.repositories
            .exercises
            .get_by_id(id)?
            .ok_or_else(|| TrackerError::exercise_not_found(id))
    }

    /// Load a workout with its exercises and sets; it must exist
    pub fn require_workout(&self, id: WorkoutId) -> TrackerResult<WorkoutWithExercises> {
        self.repositories
            .workouts
            .get_with_exercises(id)?
            .ok_or_else(|| TrackerError::workout_not_found(id))
    }

    /// Load a plan with its exercise slots; it must exist
    pub fn require_workout_plan(&self, id: WorkoutPlanId) -> TrackerResult<WorkoutPlanWithExercises> {
        self.repositories
            .plans
            .get_with_exercises(id)?
            .ok_or_else(|| TrackerError::workout_plan_not_found(id))
    }
}
