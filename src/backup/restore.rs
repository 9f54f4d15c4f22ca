//! Backup restoration
//!
//! Restore merges a backup document into the current store: every record is
//! inserted as a new row and plan slots are re-linked to exercises by name.
//! The document is parsed in full before anything is written, so a document
//! that fails to parse leaves the store untouched. Workouts in the document
//! are not replayed.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::document::BackupData;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{ExerciseId, WorkoutPlanExerciseId, WorkoutPlanWithExercises};
use crate::repository::Repositories;

/// Imports backup documents into the store
#[derive(Debug, Clone)]
pub struct RestoreManager {
    repos: Repositories,
}

impl RestoreManager {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    /// Restore from a backup file
    pub fn restore_from_file(&self, backup_path: &Path) -> RestoreResult {
        match fs::read_to_string(backup_path) {
            Ok(contents) => self.restore_from_json(&contents),
            Err(e) => RestoreResult::failure(
                RestoreFailureKind::IoFailure,
                format!("Failed to read backup file {}: {}", backup_path.display(), e),
            ),
        }
    }

    /// Restore from backup JSON text
    pub fn restore_from_json(&self, json: &str) -> RestoreResult {
        match serde_json::from_str::<BackupData>(json) {
            Ok(data) => self.restore_backup_data(&data),
            Err(e) => RestoreResult::failure(
                RestoreFailureKind::ParseFailure,
                format!("Failed to parse backup: {}", e),
            ),
        }
    }

    /// Insert exercises, then body measurements, then plans. A record that
    /// fails to insert is skipped without affecting the others.
    pub fn restore_backup_data(&self, data: &BackupData) -> RestoreResult {
        let mut restored_items = 0;

        for exercise in &data.exercises {
            match self.repos.exercises.insert(&exercise.as_new()) {
                Ok(_) => restored_items += 1,
                Err(e) => warn!(name = %exercise.name, error = %e, "Skipped exercise during restore"),
            }
        }

        for measurement in &data.body_measurements {
            match self.repos.measurements.insert(&measurement.as_new()) {
                Ok(_) => restored_items += 1,
                Err(e) => warn!(date = %measurement.date, error = %e, "Skipped body measurement during restore"),
            }
        }

        let exercise_ids = self.exercise_ids_by_name();
        for plan in &data.workout_plans {
            if self.restore_plan(plan, &exercise_ids) {
                restored_items += 1;
            }
        }

        info!(
            restored_items,
            skipped_workouts = data.workouts.len(),
            "Backup restored"
        );
        RestoreResult::Success { restored_items }
    }

    /// Exercise name to id, taking the lowest id when names repeat
    fn exercise_ids_by_name(&self) -> HashMap<String, ExerciseId> {
        let exercises = match self.repos.exercises.get_all() {
            Ok(exercises) => exercises,
            Err(e) => {
                warn!(error = %e, "Could not load exercises; plan exercises will be dropped");
                return HashMap::new();
            }
        };

        let mut ids: HashMap<String, ExerciseId> = HashMap::new();
        for exercise in exercises {
            ids.entry(exercise.name)
                .and_modify(|id| *id = (*id).min(exercise.id))
                .or_insert(exercise.id);
        }
        ids
    }

    /// Insert one plan and whichever of its slots resolve; true once the plan row exists
    fn restore_plan(
        &self,
        plan: &WorkoutPlanWithExercises,
        exercise_ids: &HashMap<String, ExerciseId>,
    ) -> bool {
        let plan_id = match self.repos.plans.insert(&plan.workout_plan.as_new()) {
            Ok(id) => id,
            Err(e) => {
                warn!(name = %plan.workout_plan.name, error = %e, "Skipped workout plan during restore");
                return false;
            }
        };

        for slot in &plan.plan_exercises {
            let Some(&exercise_id) = exercise_ids.get(&slot.exercise.name) else {
                warn!(
                    plan = %plan.workout_plan.name,
                    exercise = %slot.exercise.name,
                    "Dropped plan exercise with no matching exercise"
                );
                continue;
            };

            let mut relinked = slot.workout_plan_exercise.clone();
            relinked.id = WorkoutPlanExerciseId::UNSAVED;
            relinked.workout_plan_id = plan_id;
            relinked.exercise_id = exercise_id;

            if let Err(e) = self.repos.plans.insert_plan_exercise(&relinked) {
                warn!(
                    plan = %plan.workout_plan.name,
                    exercise = %slot.exercise.name,
                    error = %e,
                    "Skipped plan exercise during restore"
                );
            }
        }

        true
    }

    /// Parse backup JSON without touching the store
    pub fn validate_json(&self, json: &str) -> TrackerResult<ValidationResult> {
        let data: BackupData = serde_json::from_str(json)
            .map_err(|e| TrackerError::Json(format!("Failed to parse backup: {}", e)))?;
        Ok(ValidationResult::from(&data))
    }

    /// Validate a backup file without restoring it
    pub fn validate_file(&self, backup_path: &Path) -> TrackerResult<ValidationResult> {
        let contents = fs::read_to_string(backup_path)
            .map_err(|e| TrackerError::Io(format!("Failed to read backup file: {}", e)))?;
        self.validate_json(&contents)
    }
}

/// Why a restore did not run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreFailureKind {
    /// The text is not a valid backup document
    ParseFailure,
    /// The backup file could not be read
    IoFailure,
}

impl fmt::Display for RestoreFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParseFailure => write!(f, "parse failure"),
            Self::IoFailure => write!(f, "I/O failure"),
        }
    }
}

/// Outcome of a restore
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreResult {
    /// Exercises, measurements and plans inserted
    Success { restored_items: usize },
    /// The document could not be read or parsed. Parsing completes before
    /// the first insert, so nothing was written.
    Failure {
        kind: RestoreFailureKind,
        message: String,
    },
}

impl RestoreResult {
    fn failure(kind: RestoreFailureKind, message: String) -> Self {
        warn!(%kind, %message, "Restore failed");
        Self::Failure { kind, message }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Items restored, zero on failure
    pub fn restored_items(&self) -> usize {
        match self {
            Self::Success { restored_items } => *restored_items,
            Self::Failure { .. } => 0,
        }
    }

    pub fn summary(&self) -> String {
        match self {
            Self::Success { restored_items } => format!("Restored {} items", restored_items),
            Self::Failure { kind, message } => format!("Restore failed ({}): {}", kind, message),
        }
    }
}

/// What a backup document contains
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub app_version: String,
    pub export_date: Option<DateTime<Utc>>,
    pub exercises: usize,
    pub workouts: usize,
    pub workout_plans: usize,
    pub body_measurements: usize,
}

impl From<&BackupData> for ValidationResult {
    fn from(data: &BackupData) -> Self {
        Self {
            app_version: data.app_version.clone(),
            export_date: data.export_time(),
            exercises: data.exercises.len(),
            workouts: data.workouts.len(),
            workout_plans: data.workout_plans.len(),
            body_measurements: data.body_measurements.len(),
        }
    }
}

impl ValidationResult {
    pub fn summary(&self) -> String {
        format!(
            "{} exercises, {} workouts, {} plans, {} body measurements",
            self.exercises, self.workouts, self.workout_plans, self.body_measurements
        )
    }
}
