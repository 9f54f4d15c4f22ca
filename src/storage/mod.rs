//! Storage layer
//!
//! Typed data-access objects over an embedded SQLite database, plus the JSON
//! file helpers used for small side files (preferences).
//!
//! # Layout
//!
//! - `database`: the connection handle and change feed shared by every DAO
//! - `schema`: table definitions and migration
//! - `subscription`: reactive read subscriptions
//! - `exercises`, `workouts`, `plans`, `measurements`: one DAO per entity family
//! - `file_io`: atomic JSON file writes

pub mod database;
pub mod exercises;
pub mod file_io;
pub mod measurements;
pub mod plans;
pub mod schema;
pub mod subscription;
pub mod workouts;

pub use database::Database;
pub use exercises::ExerciseDao;
pub use file_io::{read_json, write_json_atomic};
pub use measurements::BodyMeasurementDao;
pub use plans::WorkoutPlanDao;
pub use subscription::{Subscription, Table};
pub use workouts::WorkoutDao;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Params, Row};

use crate::error::TrackerResult;

/// Maps one result row onto a model
pub(crate) trait FromSqliteRow: Sized {
    fn from_row(row: &Row) -> rusqlite::Result<Self>;
}

/// Run a query and map every row
pub(crate) fn query_all<T, P>(conn: &Connection, sql: &str, params: P) -> TrackerResult<Vec<T>>
where
    T: FromSqliteRow,
    P: Params,
{
    let mut stmt = conn.prepare_cached(sql)?;
    let rows = stmt.query_map(params, |row| T::from_row(row))?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

/// Run a query expected to yield at most one row
pub(crate) fn query_optional<T, P>(conn: &Connection, sql: &str, params: P) -> TrackerResult<Option<T>>
where
    T: FromSqliteRow,
    P: Params,
{
    Ok(conn.query_row(sql, params, |row| T::from_row(row)).optional()?)
}

/// Read an epoch-millisecond column as a UTC timestamp
pub(crate) fn timestamp_column(row: &Row, column: &str) -> rusqlite::Result<DateTime<Utc>> {
    let millis: i64 = row.get(column)?;
    DateTime::from_timestamp_millis(millis)
        .ok_or(rusqlite::Error::IntegralValueOutOfRange(0, millis))
}

/// Read a nullable epoch-millisecond column
pub(crate) fn optional_timestamp_column(
    row: &Row,
    column: &str,
) -> rusqlite::Result<Option<DateTime<Utc>>> {
    let millis: Option<i64> = row.get(column)?;
    millis
        .map(|m| {
            DateTime::from_timestamp_millis(m).ok_or(rusqlite::Error::IntegralValueOutOfRange(0, m))
        })
        .transpose()
}
