//! Schema definition and migration
//!
//! Timestamps are stored as epoch milliseconds (INTEGER), booleans as 0/1.
//! Every child table cascades deletes from its parents.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::error::{TrackerError, TrackerResult};

/// Current schema version for migration tracking
pub const SCHEMA_VERSION: i32 = 1;

/// Schema initialization SQL
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL,
    applied_at INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS exercises (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    uses_weight INTEGER NOT NULL,
    created_at INTEGER NOT NULL,
    is_active INTEGER NOT NULL DEFAULT 1
);

CREATE INDEX IF NOT EXISTS idx_exercises_name ON exercises(name);

CREATE TABLE IF NOT EXISTS workouts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    date INTEGER NOT NULL,
    start_time INTEGER NOT NULL,
    end_time INTEGER,
    notes TEXT NOT NULL DEFAULT ''
);

CREATE INDEX IF NOT EXISTS idx_workouts_date ON workouts(date);

CREATE TABLE IF NOT EXISTS workout_exercises (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    workout_id INTEGER NOT NULL REFERENCES workouts(id) ON DELETE CASCADE,
    exercise_id INTEGER NOT NULL REFERENCES exercises(id) ON DELETE CASCADE,
    order_index INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_workout_exercises_workout ON workout_exercises(workout_id);
CREATE INDEX IF NOT EXISTS idx_workout_exercises_exercise ON workout_exercises(exercise_id);

CREATE TABLE IF NOT EXISTS exercise_sets (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    workout_exercise_id INTEGER NOT NULL REFERENCES workout_exercises(id) ON DELETE CASCADE,
    set_number INTEGER NOT NULL,
    reps INTEGER NOT NULL,
    weight REAL,
    is_completed INTEGER NOT NULL DEFAULT 0,
    rest_time INTEGER
);

CREATE INDEX IF NOT EXISTS idx_exercise_sets_parent ON exercise_sets(workout_exercise_id);

CREATE TABLE IF NOT EXISTS workout_plans (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    created_at INTEGER NOT NULL,
    is_active INTEGER NOT NULL DEFAULT 1
);

CREATE TABLE IF NOT EXISTS workout_plan_exercises (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    workout_plan_id INTEGER NOT NULL REFERENCES workout_plans(id) ON DELETE CASCADE,
    exercise_id INTEGER NOT NULL REFERENCES exercises(id) ON DELETE CASCADE,
    order_index INTEGER NOT NULL,
    suggested_sets INTEGER NOT NULL DEFAULT 3,
    suggested_reps INTEGER NOT NULL DEFAULT 10,
    suggested_weight REAL
);

CREATE INDEX IF NOT EXISTS idx_plan_exercises_plan ON workout_plan_exercises(workout_plan_id);
CREATE INDEX IF NOT EXISTS idx_plan_exercises_exercise ON workout_plan_exercises(exercise_id);

CREATE TABLE IF NOT EXISTS body_measurements (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    date INTEGER NOT NULL,
    weight REAL,
    waist REAL,
    chest REAL,
    biceps REAL,
    forearm REAL,
    thigh REAL,
    calf REAL,
    notes TEXT NOT NULL DEFAULT ''
);

CREATE INDEX IF NOT EXISTS idx_body_measurements_date ON body_measurements(date);
"#;

/// Enable per-connection settings. Foreign keys are off by default in SQLite.
pub(crate) fn configure(conn: &Connection) -> TrackerResult<()> {
    conn.pragma_update(None, "foreign_keys", true)
        .map_err(|e| TrackerError::Database(format!("Failed to enable foreign keys: {}", e)))?;
    Ok(())
}

/// Read the applied schema version, `None` on a fresh database
pub(crate) fn current_version(conn: &Connection) -> TrackerResult<Option<i32>> {
    let has_table: Option<String> = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'schema_version'",
            [],
            |row| row.get(0),
        )
        .optional()?;

    if has_table.is_none() {
        return Ok(None);
    }

    Ok(conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?)
}

/// Create or upgrade the schema
pub(crate) fn migrate(conn: &Connection) -> TrackerResult<()> {
    let version = current_version(conn)?;
    if version.is_some_and(|v| v >= SCHEMA_VERSION) {
        debug!(version = ?version, "Schema up to date");
        return Ok(());
    }

    info!(from = ?version, to = SCHEMA_VERSION, "Applying schema migration");
    conn.execute_batch(SCHEMA_SQL)
        .map_err(|e| TrackerError::Database(format!("Failed to run migrations: {}", e)))?;

    conn.execute(
        "INSERT INTO schema_version (version, applied_at) VALUES (?1, ?2)",
        params![SCHEMA_VERSION, Utc::now().timestamp_millis()],
    )?;

    Ok(())
}
