//! Exercise data access

use std::sync::Arc;

use rusqlite::{params, Connection, Row};
use tracing::debug;

use super::database::Database;
use super::subscription::{Subscription, Table};
use super::workouts::sets_for_workout_exercise;
use super::{query_all, query_optional, timestamp_column, FromSqliteRow};
use crate::error::TrackerResult;
use crate::models::{
    Exercise, ExerciseId, ExerciseWithHistory, WorkoutExercise, WorkoutExerciseWithSets,
};

const SELECT_EXERCISE: &str =
    "SELECT id, name, uses_weight, created_at, is_active FROM exercises";

impl FromSqliteRow for Exercise {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            uses_weight: row.get("uses_weight")?,
            created_at: timestamp_column(row, "created_at")?,
            is_active: row.get("is_active")?,
        })
    }
}

pub(crate) fn all_active(conn: &Connection) -> TrackerResult<Vec<Exercise>> {
    query_all(
        conn,
        &format!("{SELECT_EXERCISE} WHERE is_active = 1 ORDER BY name ASC, id ASC"),
        [],
    )
}

pub(crate) fn all(conn: &Connection) -> TrackerResult<Vec<Exercise>> {
    query_all(conn, &format!("{SELECT_EXERCISE} ORDER BY name ASC, id ASC"), [])
}

pub(crate) fn by_id(conn: &Connection, id: ExerciseId) -> TrackerResult<Option<Exercise>> {
    query_optional(conn, &format!("{SELECT_EXERCISE} WHERE id = ?1"), [id])
}

fn search_active(conn: &Connection, query: &str) -> TrackerResult<Vec<Exercise>> {
    let needle = query.to_lowercase();
    let matches = all_active(conn)?
        .into_iter()
        .filter(|exercise| exercise.name.to_lowercase().contains(&needle))
        .collect();
    Ok(matches)
}

/// Typed queries and mutations for the `exercises` table
#[derive(Debug, Clone)]
pub struct ExerciseDao {
    db: Arc<Database>,
}

impl ExerciseDao {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Arc<Database> {
        &self.db
    }

    /// Active exercises ordered by name
    pub fn get_all_active(&self) -> TrackerResult<Vec<Exercise>> {
        self.db.read(all_active)
    }

    pub fn watch_all_active(&self) -> Subscription<Vec<Exercise>> {
        self.db.subscribe(&[Table::Exercises], all_active)
    }

    /// Every exercise including deactivated ones, ordered by name
    pub fn get_all(&self) -> TrackerResult<Vec<Exercise>> {
        self.db.read(all)
    }

    pub fn watch_all(&self) -> Subscription<Vec<Exercise>> {
        self.db.subscribe(&[Table::Exercises], all)
    }

    pub fn get_by_id(&self, id: ExerciseId) -> TrackerResult<Option<Exercise>> {
        self.db.read(|conn| by_id(conn, id))
    }

    /// Insert a new exercise and return its assigned id. The row's own id is ignored.
    pub fn insert(&self, exercise: &Exercise) -> TrackerResult<ExerciseId> {
        self.db.write(&[Table::Exercises], |conn| {
            conn.execute(
                "INSERT INTO exercises (name, uses_weight, created_at, is_active)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    exercise.name,
                    exercise.uses_weight,
                    exercise.created_at.timestamp_millis(),
                    exercise.is_active,
                ],
            )?;
            let id = ExerciseId::new(conn.last_insert_rowid());
            debug!(%id, name = %exercise.name, "Inserted exercise");
            Ok(id)
        })
    }

    /// Overwrite the row with the same id; a missing row is left alone
    pub fn update(&self, exercise: &Exercise) -> TrackerResult<()> {
        self.db.write(&[Table::Exercises], |conn| {
            conn.execute(
                "UPDATE exercises SET name = ?2, uses_weight = ?3, created_at = ?4, is_active = ?5
                 WHERE id = ?1",
                params![
                    exercise.id,
                    exercise.name,
                    exercise.uses_weight,
                    exercise.created_at.timestamp_millis(),
                    exercise.is_active,
                ],
            )?;
            Ok(())
        })
    }

    /// Hard delete; cascades to workout exercises, their sets and plan exercises
    pub fn delete(&self, exercise: &Exercise) -> TrackerResult<()> {
        self.db.write(
            &[
                Table::Exercises,
                Table::WorkoutExercises,
                Table::ExerciseSets,
                Table::WorkoutPlanExercises,
            ],
            |conn| {
                conn.execute("DELETE FROM exercises WHERE id = ?1", [exercise.id])?;
                Ok(())
            },
        )
    }

    /// Soft delete: hide from active listings but keep history
    pub fn deactivate(&self, id: ExerciseId) -> TrackerResult<()> {
        self.db.write(&[Table::Exercises], |conn| {
            conn.execute("UPDATE exercises SET is_active = 0 WHERE id = ?1", [id])?;
            Ok(())
        })
    }

    /// The exercise and every workout entry that used it
    pub fn get_with_history(&self, id: ExerciseId) -> TrackerResult<Option<ExerciseWithHistory>> {
        self.db.read(|conn| {
            let Some(exercise) = by_id(conn, id)? else {
                return Ok(None);
            };

            let entries: Vec<WorkoutExercise> = query_all(
                conn,
                "SELECT id, workout_id, exercise_id, order_index FROM workout_exercises
                 WHERE exercise_id = ?1 ORDER BY id ASC",
                [id],
            )?;

            let workout_exercises = entries
                .into_iter()
                .map(|workout_exercise| {
                    let sets = sets_for_workout_exercise(conn, workout_exercise.id)?;
                    Ok(WorkoutExerciseWithSets {
                        workout_exercise,
                        sets,
                    })
                })
                .collect::<TrackerResult<Vec<_>>>()?;

            Ok(Some(ExerciseWithHistory {
                exercise,
                workout_exercises,
            }))
        })
    }

    /// Active exercises whose name contains `query`, ignoring case
    pub fn search(&self, query: &str) -> TrackerResult<Vec<Exercise>> {
        self.db.read(|conn| search_active(conn, query))
    }

    pub fn watch_search(&self, query: &str) -> Subscription<Vec<Exercise>> {
        let query = query.to_string();
        self.db
            .subscribe(&[Table::Exercises], move |conn| search_active(conn, &query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExerciseSet, Workout, WorkoutExercise};
    use crate::storage::WorkoutDao;
    use chrono::Utc;

    fn setup() -> ExerciseDao {
        ExerciseDao::new(Arc::new(Database::open_in_memory().unwrap()))
    }

    #[test]
    fn test_insert_assigns_id_and_ignores_given_one() {
        let dao = setup();
        let mut exercise = Exercise::new("Squat", true);
        exercise.id = ExerciseId::new(999);

        let id = dao.insert(&exercise).unwrap();
        assert_ne!(id, ExerciseId::new(999));

        let loaded = dao.get_by_id(id).unwrap().unwrap();
        assert_eq!(loaded.name, "Squat");
        assert_eq!(loaded.created_at, exercise.created_at);
    }

    #[test]
    fn test_active_listing_sorted_by_name() {
        let dao = setup();
        dao.insert(&Exercise::new("Squat", true)).unwrap();
        dao.insert(&Exercise::new("Bench Press", true)).unwrap();
        let plank = dao.insert(&Exercise::new("Plank", false)).unwrap();
        dao.deactivate(plank).unwrap();

        let names: Vec<_> = dao
            .get_all_active()
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["Bench Press", "Squat"]);

        assert_eq!(dao.get_all().unwrap().len(), 3);
        assert!(!dao.get_by_id(plank).unwrap().unwrap().is_active);
    }

    #[test]
    fn test_update_missing_row_is_noop() {
        let dao = setup();
        let mut ghost = Exercise::new("Ghost", false);
        ghost.id = ExerciseId::new(42);

        dao.update(&ghost).unwrap();
        assert!(dao.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_update_overwrites_row() {
        let dao = setup();
        let id = dao.insert(&Exercise::new("Row", true)).unwrap();

        let mut exercise = dao.get_by_id(id).unwrap().unwrap();
        exercise.name = "Barbell Row".into();
        dao.update(&exercise).unwrap();

        assert_eq!(dao.get_by_id(id).unwrap().unwrap().name, "Barbell Row");
    }

    #[test]
    fn test_search_is_case_insensitive_and_active_only() {
        let dao = setup();
        dao.insert(&Exercise::new("Bench Press", true)).unwrap();
        dao.insert(&Exercise::new("Leg Press", true)).unwrap();
        let old = dao.insert(&Exercise::new("Press-up", false)).unwrap();
        dao.deactivate(old).unwrap();
        dao.insert(&Exercise::new("Squat", true)).unwrap();

        let found: Vec<_> = dao
            .search("PRESS")
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(found, vec!["Bench Press", "Leg Press"]);
    }

    #[test]
    fn test_watch_search_follows_inserts() {
        let dao = setup();
        let mut sub = dao.watch_search("curl");
        assert!(sub.current().unwrap().is_empty());

        dao.insert(&Exercise::new("Hammer Curl", true)).unwrap();
        let snapshot = sub.poll().unwrap().unwrap();
        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn test_history_and_cascade() {
        let db = Arc::new(Database::open_in_memory().unwrap());
        let exercises = ExerciseDao::new(db.clone());
        let workouts = WorkoutDao::new(db);

        let squat_id = exercises.insert(&Exercise::new("Squat", true)).unwrap();
        let workout_id = workouts.insert(&Workout::new("Legs", Utc::now())).unwrap();
        let entry_id = workouts
            .insert_workout_exercise(&WorkoutExercise::new(workout_id, squat_id, 0))
            .unwrap();
        workouts
            .insert_set(&ExerciseSet::new(entry_id, 1, 5, Some(100.0)))
            .unwrap();

        let history = exercises.get_with_history(squat_id).unwrap().unwrap();
        assert_eq!(history.workout_exercises.len(), 1);
        assert_eq!(history.workout_exercises[0].sets.len(), 1);

        let squat = exercises.get_by_id(squat_id).unwrap().unwrap();
        exercises.delete(&squat).unwrap();

        let remaining = workouts.get_with_exercises(workout_id).unwrap().unwrap();
        assert!(remaining.workout_exercises.is_empty());
        assert!(workouts.get_sets_for_workout_exercise(entry_id).unwrap().is_empty());
    }

    #[test]
    fn test_history_of_missing_exercise() {
        let dao = setup();
        assert!(dao.get_with_history(ExerciseId::new(7)).unwrap().is_none());
    }
}
