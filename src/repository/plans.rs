//! Workout plan repository

use std::sync::Arc;

use crate::error::TrackerResult;
use crate::models::{
    WorkoutPlan, WorkoutPlanExercise, WorkoutPlanExerciseId, WorkoutPlanId,
    WorkoutPlanWithExercises,
};
use crate::storage::{Database, Subscription, WorkoutPlanDao};

/// Repository for workout plans and their exercise slots
#[derive(Debug, Clone)]
pub struct WorkoutPlanRepository {
    dao: WorkoutPlanDao,
}

impl WorkoutPlanRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            dao: WorkoutPlanDao::new(db),
        }
    }

    pub fn watch_all_active(&self) -> Subscription<Vec<WorkoutPlan>> {
        self.dao.watch_all_active()
    }

    pub fn get_all_active(&self) -> TrackerResult<Vec<WorkoutPlan>> {
        self.dao.get_all_active()
    }

    pub fn watch_all_active_with_exercises(&self) -> Subscription<Vec<WorkoutPlanWithExercises>> {
        self.dao.watch_all_active_with_exercises()
    }

    pub fn get_all_active_with_exercises(&self) -> TrackerResult<Vec<WorkoutPlanWithExercises>> {
        self.dao.get_all_active_with_exercises()
    }

    pub fn get_by_id(&self, id: WorkoutPlanId) -> TrackerResult<Option<WorkoutPlan>> {
        self.dao.get_by_id(id)
    }

    pub fn watch_with_exercises(
        &self,
        id: WorkoutPlanId,
    ) -> Subscription<Option<WorkoutPlanWithExercises>> {
        self.dao.watch_with_exercises(id)
    }

    pub fn get_with_exercises(
        &self,
        id: WorkoutPlanId,
    ) -> TrackerResult<Option<WorkoutPlanWithExercises>> {
        self.dao.get_with_exercises(id)
    }

    pub fn insert(&self, plan: &WorkoutPlan) -> TrackerResult<WorkoutPlanId> {
        self.dao.insert(plan)
    }

    pub fn update(&self, plan: &WorkoutPlan) -> TrackerResult<()> {
        self.dao.update(plan)
    }

    pub fn delete(&self, plan: &WorkoutPlan) -> TrackerResult<()> {
        self.dao.delete(plan)
    }

    pub fn deactivate(&self, id: WorkoutPlanId) -> TrackerResult<()> {
        self.dao.deactivate(id)
    }

    pub fn insert_plan_exercise(
        &self,
        slot: &WorkoutPlanExercise,
    ) -> TrackerResult<WorkoutPlanExerciseId> {
        self.dao.insert_plan_exercise(slot)
    }

    pub fn update_plan_exercise(&self, slot: &WorkoutPlanExercise) -> TrackerResult<()> {
        self.dao.update_plan_exercise(slot)
    }

    pub fn delete_plan_exercise(&self, slot: &WorkoutPlanExercise) -> TrackerResult<()> {
        self.dao.delete_plan_exercise(slot)
    }

    pub fn delete_all_exercises_from_plan(&self, plan_id: WorkoutPlanId) -> TrackerResult<()> {
        self.dao.delete_all_exercises_from_plan(plan_id)
    }
}
