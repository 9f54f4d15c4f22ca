//! Workout data access
//!
//! Covers workouts, the exercises performed in them and their sets. The
//! joined reads assemble [`WorkoutWithExercises`] under a single lock so the
//! parent and children come from the same state.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use tracing::debug;

use super::database::Database;
use super::exercises;
use super::subscription::{Subscription, Table};
use super::{optional_timestamp_column, query_all, query_optional, timestamp_column, FromSqliteRow};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{
    Exercise, ExerciseId, ExerciseSet, ExerciseSetId, Workout, WorkoutExercise,
    WorkoutExerciseId, WorkoutExerciseWithDetails, WorkoutId, WorkoutWithExercises,
};

const SELECT_WORKOUT: &str = "SELECT id, name, date, start_time, end_time, notes FROM workouts";

const WORKOUT_TABLES: [Table; 3] = [Table::Workouts, Table::WorkoutExercises, Table::ExerciseSets];

/// Joined workout reads also resolve exercises
const WORKOUT_DETAIL_TABLES: [Table; 4] = [
    Table::Workouts,
    Table::WorkoutExercises,
    Table::ExerciseSets,
    Table::Exercises,
];

impl FromSqliteRow for Workout {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            date: timestamp_column(row, "date")?,
            start_time: timestamp_column(row, "start_time")?,
            end_time: optional_timestamp_column(row, "end_time")?,
            notes: row.get("notes")?,
        })
    }
}

impl FromSqliteRow for WorkoutExercise {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            workout_id: row.get("workout_id")?,
            exercise_id: row.get("exercise_id")?,
            order_index: row.get("order_index")?,
        })
    }
}

impl FromSqliteRow for ExerciseSet {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            workout_exercise_id: row.get("workout_exercise_id")?,
            set_number: row.get("set_number")?,
            reps: row.get("reps")?,
            weight: row.get("weight")?,
            is_completed: row.get("is_completed")?,
            rest_time: row.get("rest_time")?,
        })
    }
}

fn all(conn: &Connection) -> TrackerResult<Vec<Workout>> {
    query_all(conn, &format!("{SELECT_WORKOUT} ORDER BY date DESC, id DESC"), [])
}

fn by_id(conn: &Connection, id: WorkoutId) -> TrackerResult<Option<Workout>> {
    query_optional(conn, &format!("{SELECT_WORKOUT} WHERE id = ?1"), [id])
}

fn by_date_range(
    conn: &Connection,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> TrackerResult<Vec<Workout>> {
    query_all(
        conn,
        &format!("{SELECT_WORKOUT} WHERE date BETWEEN ?1 AND ?2 ORDER BY date DESC, id DESC"),
        params![start.timestamp_millis(), end.timestamp_millis()],
    )
}

/// Sets of one workout exercise ordered by set number
pub(crate) fn sets_for_workout_exercise(
    conn: &Connection,
    workout_exercise_id: WorkoutExerciseId,
) -> TrackerResult<Vec<ExerciseSet>> {
    query_all(
        conn,
        "SELECT id, workout_exercise_id, set_number, reps, weight, is_completed, rest_time
         FROM exercise_sets WHERE workout_exercise_id = ?1 ORDER BY set_number ASC, id ASC",
        [workout_exercise_id],
    )
}

/// Caches exercise lookups while assembling several workouts
struct ExerciseLookup<'a> {
    conn: &'a Connection,
    cache: HashMap<ExerciseId, Exercise>,
}

impl<'a> ExerciseLookup<'a> {
    fn new(conn: &'a Connection) -> Self {
        Self {
            conn,
            cache: HashMap::new(),
        }
    }

    fn resolve(&mut self, id: ExerciseId) -> TrackerResult<Exercise> {
        if let Some(exercise) = self.cache.get(&id) {
            return Ok(exercise.clone());
        }
        let exercise = exercises::by_id(self.conn, id)?
            .ok_or_else(|| TrackerError::exercise_not_found(id))?;
        self.cache.insert(id, exercise.clone());
        Ok(exercise)
    }
}

fn with_details(
    conn: &Connection,
    lookup: &mut ExerciseLookup<'_>,
    workout: Workout,
) -> TrackerResult<WorkoutWithExercises> {
    let entries: Vec<WorkoutExercise> = query_all(
        conn,
        "SELECT id, workout_id, exercise_id, order_index FROM workout_exercises
         WHERE workout_id = ?1 ORDER BY order_index ASC, id ASC",
        [workout.id],
    )?;

    let mut workout_exercises = Vec::with_capacity(entries.len());
    for workout_exercise in entries {
        workout_exercises.push(WorkoutExerciseWithDetails {
            exercise: lookup.resolve(workout_exercise.exercise_id)?,
            sets: sets_for_workout_exercise(conn, workout_exercise.id)?,
            workout_exercise,
        });
    }

    Ok(WorkoutWithExercises {
        workout,
        workout_exercises,
    })
}

fn one_with_exercises(conn: &Connection, id: WorkoutId) -> TrackerResult<Option<WorkoutWithExercises>> {
    match by_id(conn, id)? {
        Some(workout) => Ok(Some(with_details(conn, &mut ExerciseLookup::new(conn), workout)?)),
        None => Ok(None),
    }
}

fn all_with_exercises(conn: &Connection) -> TrackerResult<Vec<WorkoutWithExercises>> {
    let mut lookup = ExerciseLookup::new(conn);
    all(conn)?
        .into_iter()
        .map(|workout| with_details(conn, &mut lookup, workout))
        .collect()
}

/// Typed queries and mutations for workouts, workout exercises and sets
#[derive(Debug, Clone)]
pub struct WorkoutDao {
    db: Arc<Database>,
}

impl WorkoutDao {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// All workouts, newest first
    pub fn get_all(&self) -> TrackerResult<Vec<Workout>> {
        self.db.read(all)
    }

    pub fn watch_all(&self) -> Subscription<Vec<Workout>> {
        self.db.subscribe(&[Table::Workouts], all)
    }

    pub fn get_by_id(&self, id: WorkoutId) -> TrackerResult<Option<Workout>> {
        self.db.read(|conn| by_id(conn, id))
    }

    pub fn get_with_exercises(&self, id: WorkoutId) -> TrackerResult<Option<WorkoutWithExercises>> {
        self.db.read(|conn| one_with_exercises(conn, id))
    }

    pub fn watch_with_exercises(
        &self,
        id: WorkoutId,
    ) -> Subscription<Option<WorkoutWithExercises>> {
        self.db
            .subscribe(&WORKOUT_DETAIL_TABLES, move |conn| one_with_exercises(conn, id))
    }

    /// Every workout with its exercises and sets, newest first
    pub fn get_all_with_exercises(&self) -> TrackerResult<Vec<WorkoutWithExercises>> {
        self.db.read(all_with_exercises)
    }

    pub fn watch_all_with_exercises(&self) -> Subscription<Vec<WorkoutWithExercises>> {
        self.db.subscribe(&WORKOUT_DETAIL_TABLES, all_with_exercises)
    }

    /// Workouts dated within `[start, end]`, newest first
    pub fn get_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> TrackerResult<Vec<Workout>> {
        self.db.read(|conn| by_date_range(conn, start, end))
    }

    pub fn watch_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Subscription<Vec<Workout>> {
        self.db
            .subscribe(&[Table::Workouts], move |conn| by_date_range(conn, start, end))
    }

    /// Number of workouts dated within `[start, end]`
    pub fn count_in_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> TrackerResult<usize> {
        self.db.read(|conn| {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM workouts WHERE date BETWEEN ?1 AND ?2",
                params![start.timestamp_millis(), end.timestamp_millis()],
                |row| row.get(0),
            )?;
            Ok(count as usize)
        })
    }

    pub fn insert(&self, workout: &Workout) -> TrackerResult<WorkoutId> {
        self.db.write(&[Table::Workouts], |conn| {
            conn.execute(
                "INSERT INTO workouts (name, date, start_time, end_time, notes)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    workout.name,
                    workout.date.timestamp_millis(),
                    workout.start_time.timestamp_millis(),
                    workout.end_time.map(|t| t.timestamp_millis()),
                    workout.notes,
                ],
            )?;
            let id = WorkoutId::new(conn.last_insert_rowid());
            debug!(%id, "Inserted workout");
            Ok(id)
        })
    }

    pub fn update(&self, workout: &Workout) -> TrackerResult<()> {
        self.db.write(&[Table::Workouts], |conn| {
            conn.execute(
                "UPDATE workouts SET name = ?2, date = ?3, start_time = ?4, end_time = ?5, notes = ?6
                 WHERE id = ?1",
                params![
                    workout.id,
                    workout.name,
                    workout.date.timestamp_millis(),
                    workout.start_time.timestamp_millis(),
                    workout.end_time.map(|t| t.timestamp_millis()),
                    workout.notes,
                ],
            )?;
            Ok(())
        })
    }

    /// Hard delete; cascades to its workout exercises and their sets
    pub fn delete(&self, workout: &Workout) -> TrackerResult<()> {
        self.db.write(&WORKOUT_TABLES, |conn| {
            conn.execute("DELETE FROM workouts WHERE id = ?1", [workout.id])?;
            Ok(())
        })
    }

    pub fn insert_workout_exercise(
        &self,
        workout_exercise: &WorkoutExercise,
    ) -> TrackerResult<WorkoutExerciseId> {
        self.db.write(&[Table::WorkoutExercises], |conn| {
            conn.execute(
                "INSERT INTO workout_exercises (workout_id, exercise_id, order_index)
                 VALUES (?1, ?2, ?3)",
                params![
                    workout_exercise.workout_id,
                    workout_exercise.exercise_id,
                    workout_exercise.order_index,
                ],
            )?;
            Ok(WorkoutExerciseId::new(conn.last_insert_rowid()))
        })
    }

    pub fn update_workout_exercise(&self, workout_exercise: &WorkoutExercise) -> TrackerResult<()> {
        self.db.write(&[Table::WorkoutExercises], |conn| {
            conn.execute(
                "UPDATE workout_exercises SET workout_id = ?2, exercise_id = ?3, order_index = ?4
                 WHERE id = ?1",
                params![
                    workout_exercise.id,
                    workout_exercise.workout_id,
                    workout_exercise.exercise_id,
                    workout_exercise.order_index,
                ],
            )?;
            Ok(())
        })
    }

    pub fn delete_workout_exercise(&self, workout_exercise: &WorkoutExercise) -> TrackerResult<()> {
        self.db
            .write(&[Table::WorkoutExercises, Table::ExerciseSets], |conn| {
                conn.execute(
                    "DELETE FROM workout_exercises WHERE id = ?1",
                    [workout_exercise.id],
                )?;
                Ok(())
            })
    }

    pub fn get_sets_for_workout_exercise(
        &self,
        workout_exercise_id: WorkoutExerciseId,
    ) -> TrackerResult<Vec<ExerciseSet>> {
        self.db
            .read(|conn| sets_for_workout_exercise(conn, workout_exercise_id))
    }

    pub fn insert_set(&self, set: &ExerciseSet) -> TrackerResult<ExerciseSetId> {
        self.db.write(&[Table::ExerciseSets], |conn| {
            conn.execute(
                "INSERT INTO exercise_sets
                 (workout_exercise_id, set_number, reps, weight, is_completed, rest_time)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    set.workout_exercise_id,
                    set.set_number,
                    set.reps,
                    set.weight,
                    set.is_completed,
                    set.rest_time,
                ],
            )?;
            Ok(ExerciseSetId::new(conn.last_insert_rowid()))
        })
    }

    pub fn update_set(&self, set: &ExerciseSet) -> TrackerResult<()> {
        self.db.write(&[Table::ExerciseSets], |conn| {
            conn.execute(
                "UPDATE exercise_sets SET workout_exercise_id = ?2, set_number = ?3, reps = ?4,
                 weight = ?5, is_completed = ?6, rest_time = ?7
                 WHERE id = ?1",
                params![
                    set.id,
                    set.workout_exercise_id,
                    set.set_number,
                    set.reps,
                    set.weight,
                    set.is_completed,
                    set.rest_time,
                ],
            )?;
            Ok(())
        })
    }

    pub fn delete_set(&self, set: &ExerciseSet) -> TrackerResult<()> {
        self.db.write(&[Table::ExerciseSets], |conn| {
            conn.execute("DELETE FROM exercise_sets WHERE id = ?1", [set.id])?;
            Ok(())
        })
    }
}
