//! Workout plan data access

use std::sync::Arc;

use rusqlite::{params, Connection, Row};
use tracing::debug;

use super::database::Database;
use super::exercises;
use super::subscription::{Subscription, Table};
use super::{query_all, query_optional, timestamp_column, FromSqliteRow};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{
    WorkoutPlan, WorkoutPlanExercise, WorkoutPlanExerciseId, WorkoutPlanExerciseWithDetails,
    WorkoutPlanId, WorkoutPlanWithExercises,
};

const SELECT_PLAN: &str =
    "SELECT id, name, description, created_at, is_active FROM workout_plans";

const PLAN_DETAIL_TABLES: [Table; 3] = [
    Table::WorkoutPlans,
    Table::WorkoutPlanExercises,
    Table::Exercises,
];

impl FromSqliteRow for WorkoutPlan {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            description: row.get("description")?,
            created_at: timestamp_column(row, "created_at")?,
            is_active: row.get("is_active")?,
        })
    }
}

impl FromSqliteRow for WorkoutPlanExercise {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            workout_plan_id: row.get("workout_plan_id")?,
            exercise_id: row.get("exercise_id")?,
            order_index: row.get("order_index")?,
            suggested_sets: row.get("suggested_sets")?,
            suggested_reps: row.get("suggested_reps")?,
            suggested_weight: row.get("suggested_weight")?,
        })
    }
}

fn all_active(conn: &Connection) -> TrackerResult<Vec<WorkoutPlan>> {
    query_all(
        conn,
        &format!("{SELECT_PLAN} WHERE is_active = 1 ORDER BY name ASC, id ASC"),
        [],
    )
}

fn by_id(conn: &Connection, id: WorkoutPlanId) -> TrackerResult<Option<WorkoutPlan>> {
    query_optional(conn, &format!("{SELECT_PLAN} WHERE id = ?1"), [id])
}

fn with_details(conn: &Connection, workout_plan: WorkoutPlan) -> TrackerResult<WorkoutPlanWithExercises> {
    let slots: Vec<WorkoutPlanExercise> = query_all(
        conn,
        "SELECT id, workout_plan_id, exercise_id, order_index, suggested_sets, suggested_reps,
                suggested_weight
         FROM workout_plan_exercises WHERE workout_plan_id = ?1
         ORDER BY order_index ASC, id ASC",
        [workout_plan.id],
    )?;

    let plan_exercises = slots
        .into_iter()
        .map(|workout_plan_exercise| {
            let exercise = exercises::by_id(conn, workout_plan_exercise.exercise_id)?
                .ok_or_else(|| TrackerError::exercise_not_found(workout_plan_exercise.exercise_id))?;
            Ok(WorkoutPlanExerciseWithDetails {
                workout_plan_exercise,
                exercise,
            })
        })
        .collect::<TrackerResult<Vec<_>>>()?;

    Ok(WorkoutPlanWithExercises {
        workout_plan,
        plan_exercises,
    })
}

fn one_with_exercises(
    conn: &Connection,
    id: WorkoutPlanId,
) -> TrackerResult<Option<WorkoutPlanWithExercises>> {
    match by_id(conn, id)? {
        Some(plan) => Ok(Some(with_details(conn, plan)?)),
        None => Ok(None),
    }
}

fn all_active_with_exercises(conn: &Connection) -> TrackerResult<Vec<WorkoutPlanWithExercises>> {
    all_active(conn)?
        .into_iter()
        .map(|plan| with_details(conn, plan))
        .collect()
}

/// Typed queries and mutations for plans and their exercise slots
#[derive(Debug, Clone)]
pub struct WorkoutPlanDao {
    db: Arc<Database>,
}

impl WorkoutPlanDao {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Active plans ordered by name
    pub fn get_all_active(&self) -> TrackerResult<Vec<WorkoutPlan>> {
        self.db.read(all_active)
    }

    pub fn watch_all_active(&self) -> Subscription<Vec<WorkoutPlan>> {
        self.db.subscribe(&[Table::WorkoutPlans], all_active)
    }

    pub fn get_by_id(&self, id: WorkoutPlanId) -> TrackerResult<Option<WorkoutPlan>> {
        self.db.read(|conn| by_id(conn, id))
    }

    pub fn get_with_exercises(
        &self,
        id: WorkoutPlanId,
    ) -> TrackerResult<Option<WorkoutPlanWithExercises>> {
        self.db.read(|conn| one_with_exercises(conn, id))
    }

    pub fn watch_with_exercises(
        &self,
        id: WorkoutPlanId,
    ) -> Subscription<Option<WorkoutPlanWithExercises>> {
        self.db
            .subscribe(&PLAN_DETAIL_TABLES, move |conn| one_with_exercises(conn, id))
    }

    /// Active plans with their slots, ordered by name
    pub fn get_all_active_with_exercises(&self) -> TrackerResult<Vec<WorkoutPlanWithExercises>> {
        self.db.read(all_active_with_exercises)
    }

    pub fn watch_all_active_with_exercises(&self) -> Subscription<Vec<WorkoutPlanWithExercises>> {
        self.db.subscribe(&PLAN_DETAIL_TABLES, all_active_with_exercises)
    }

    pub fn insert(&self, plan: &WorkoutPlan) -> TrackerResult<WorkoutPlanId> {
        self.db.write(&[Table::WorkoutPlans], |conn| {
            conn.execute(
                "INSERT INTO workout_plans (name, description, created_at, is_active)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    plan.name,
                    plan.description,
                    plan.created_at.timestamp_millis(),
                    plan.is_active,
                ],
            )?;
            let id = WorkoutPlanId::new(conn.last_insert_rowid());
            debug!(%id, name = %plan.name, "Inserted workout plan");
            Ok(id)
        })
    }

    pub fn update(&self, plan: &WorkoutPlan) -> TrackerResult<()> {
        self.db.write(&[Table::WorkoutPlans], |conn| {
            conn.execute(
                "UPDATE workout_plans SET name = ?2, description = ?3, created_at = ?4, is_active = ?5
                 WHERE id = ?1",
                params![
                    plan.id,
                    plan.name,
                    plan.description,
                    plan.created_at.timestamp_millis(),
                    plan.is_active,
                ],
            )?;
            Ok(())
        })
    }

    /// Hard delete; cascades to the plan's slots
    pub fn delete(&self, plan: &WorkoutPlan) -> TrackerResult<()> {
        self.db
            .write(&[Table::WorkoutPlans, Table::WorkoutPlanExercises], |conn| {
                conn.execute("DELETE FROM workout_plans WHERE id = ?1", [plan.id])?;
                Ok(())
            })
    }

    /// Soft delete
    pub fn deactivate(&self, id: WorkoutPlanId) -> TrackerResult<()> {
        self.db.write(&[Table::WorkoutPlans], |conn| {
            conn.execute("UPDATE workout_plans SET is_active = 0 WHERE id = ?1", [id])?;
            Ok(())
        })
    }

    pub fn insert_plan_exercise(
        &self,
        slot: &WorkoutPlanExercise,
    ) -> TrackerResult<WorkoutPlanExerciseId> {
        self.db.write(&[Table::WorkoutPlanExercises], |conn| {
            conn.execute(
                "INSERT INTO workout_plan_exercises
                 (workout_plan_id, exercise_id, order_index, suggested_sets, suggested_reps,
                  suggested_weight)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    slot.workout_plan_id,
                    slot.exercise_id,
                    slot.order_index,
                    slot.suggested_sets,
                    slot.suggested_reps,
                    slot.suggested_weight,
                ],
            )?;
            Ok(WorkoutPlanExerciseId::new(conn.last_insert_rowid()))
        })
    }

    pub fn update_plan_exercise(&self, slot: &WorkoutPlanExercise) -> TrackerResult<()> {
        self.db.write(&[Table::WorkoutPlanExercises], |conn| {
            conn.execute(
                "UPDATE workout_plan_exercises SET workout_plan_id = ?2, exercise_id = ?3,
                 order_index = ?4, suggested_sets = ?5, suggested_reps = ?6, suggested_weight = ?7
                 WHERE id = ?1",
                params![
                    slot.id,
                    slot.workout_plan_id,
                    slot.exercise_id,
                    slot.order_index,
                    slot.suggested_sets,
                    slot.suggested_reps,
                    slot.suggested_weight,
                ],
            )?;
            Ok(())
        })
    }

    pub fn delete_plan_exercise(&self, slot: &WorkoutPlanExercise) -> TrackerResult<()> {
        self.db.write(&[Table::WorkoutPlanExercises], |conn| {
            conn.execute("DELETE FROM workout_plan_exercises WHERE id = ?1", [slot.id])?;
            Ok(())
        })
    }

    /// Remove every slot of a plan, leaving the plan itself
    pub fn delete_all_exercises_from_plan(&self, plan_id: WorkoutPlanId) -> TrackerResult<()> {
        self.db.write(&[Table::WorkoutPlanExercises], |conn| {
            conn.execute(
                "DELETE FROM workout_plan_exercises WHERE workout_plan_id = ?1",
                [plan_id],
            )?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Exercise, ExerciseId};
    use crate::storage::ExerciseDao;

    fn setup() -> (ExerciseDao, WorkoutPlanDao) {
        let db = Arc::new(Database::open_in_memory().unwrap());
        (ExerciseDao::new(db.clone()), WorkoutPlanDao::new(db))
    }

    #[test]
    fn test_active_plans_sorted_and_filtered() {
        let (_, plans) = setup();
        plans.insert(&WorkoutPlan::new("Push", "")).unwrap();
        plans.insert(&WorkoutPlan::new("Full Body", "")).unwrap();
        let old = plans.insert(&WorkoutPlan::new("Abandoned", "")).unwrap();
        plans.deactivate(old).unwrap();

        let names: Vec<_> = plans
            .get_all_active()
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Full Body", "Push"]);
        assert!(!plans.get_by_id(old).unwrap().unwrap().is_active);
    }

    #[test]
    fn test_plan_with_exercises() {
        let (exercises, plans) = setup();
        let squat = exercises.insert(&Exercise::new("Squat", true)).unwrap();
        let bench = exercises.insert(&Exercise::new("Bench Press", true)).unwrap();
        let plan_id = plans.insert(&WorkoutPlan::new("Strength", "5x5")).unwrap();

        plans
            .insert_plan_exercise(
                &WorkoutPlanExercise::new(plan_id, bench, 1).with_suggestion(5, 5, Some(80.0)),
            )
            .unwrap();
        plans
            .insert_plan_exercise(&WorkoutPlanExercise::new(plan_id, squat, 0))
            .unwrap();

        let detail = plans.get_with_exercises(plan_id).unwrap().unwrap();
        assert_eq!(detail.workout_plan.description, "5x5");
        assert_eq!(detail.plan_exercises[0].exercise.name, "Squat");
        assert_eq!(detail.plan_exercises[0].workout_plan_exercise.suggested_sets, 3);
        assert_eq!(detail.plan_exercises[1].workout_plan_exercise.suggested_weight, Some(80.0));
    }

    #[test]
    fn test_delete_all_exercises_keeps_plan() {
        let (exercises, plans) = setup();
        let squat = exercises.insert(&Exercise::new("Squat", true)).unwrap();
        let plan_id = plans.insert(&WorkoutPlan::new("Legs", "")).unwrap();
        plans
            .insert_plan_exercise(&WorkoutPlanExercise::new(plan_id, squat, 0))
            .unwrap();
        plans
            .insert_plan_exercise(&WorkoutPlanExercise::new(plan_id, squat, 1))
            .unwrap();

        plans.delete_all_exercises_from_plan(plan_id).unwrap();

        let detail = plans.get_with_exercises(plan_id).unwrap().unwrap();
        assert!(detail.plan_exercises.is_empty());
    }

    #[test]
    fn test_delete_plan_cascades_to_slots() {
        let (exercises, plans) = setup();
        let squat = exercises.insert(&Exercise::new("Squat", true)).unwrap();
        let mut plan = WorkoutPlan::new("Legs", "");
        plan.id = plans.insert(&plan).unwrap();
        plans
            .insert_plan_exercise(&WorkoutPlanExercise::new(plan.id, squat, 0))
            .unwrap();

        plans.delete(&plan).unwrap();

        assert!(plans.get_with_exercises(plan.id).unwrap().is_none());
        let orphans: i64 = plans
            .db
            .read(|conn| {
                Ok(conn.query_row("SELECT COUNT(*) FROM workout_plan_exercises", [], |r| r.get(0))?)
            })
            .unwrap();
        assert_eq!(orphans, 0);
    }

    #[test]
    fn test_slot_requires_existing_exercise() {
        let (_, plans) = setup();
        let plan_id = plans.insert(&WorkoutPlan::new("Legs", "")).unwrap();

        let err = plans
            .insert_plan_exercise(&WorkoutPlanExercise::new(plan_id, ExerciseId::new(9), 0))
            .unwrap_err();
        assert!(err.is_foreign_key_violation());
    }

    #[test]
    fn test_watch_active_with_exercises_sees_slot_changes() {
        let (exercises, plans) = setup();
        let squat = exercises.insert(&Exercise::new("Squat", true)).unwrap();
        let plan_id = plans.insert(&WorkoutPlan::new("Legs", "")).unwrap();

        let mut sub = plans.watch_all_active_with_exercises();
        assert!(sub.current().unwrap()[0].plan_exercises.is_empty());

        plans
            .insert_plan_exercise(&WorkoutPlanExercise::new(plan_id, squat, 0))
            .unwrap();
        let snapshot = sub.poll().unwrap().unwrap();
        assert_eq!(snapshot[0].plan_exercises.len(), 1);
    }
}
