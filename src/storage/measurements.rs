//! Body measurement data access

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};

use super::database::Database;
use super::subscription::{Subscription, Table};
use super::{query_all, query_optional, timestamp_column, FromSqliteRow};
use crate::error::TrackerResult;
use crate::models::{BodyMeasurement, BodyMeasurementId, MeasurementType};

const SELECT_MEASUREMENT: &str = "SELECT id, date, weight, waist, chest, biceps, forearm, thigh, \
     calf, notes FROM body_measurements";

impl FromSqliteRow for BodyMeasurement {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            date: timestamp_column(row, "date")?,
            weight: row.get("weight")?,
            waist: row.get("waist")?,
            chest: row.get("chest")?,
            biceps: row.get("biceps")?,
            forearm: row.get("forearm")?,
            thigh: row.get("thigh")?,
            calf: row.get("calf")?,
            notes: row.get("notes")?,
        })
    }
}

fn all(conn: &Connection) -> TrackerResult<Vec<BodyMeasurement>> {
    query_all(
        conn,
        &format!("{SELECT_MEASUREMENT} ORDER BY date DESC, id DESC"),
        [],
    )
}

fn series(conn: &Connection, kind: MeasurementType) -> TrackerResult<Vec<BodyMeasurement>> {
    query_all(
        conn,
        &format!(
            "{SELECT_MEASUREMENT} WHERE {} IS NOT NULL ORDER BY date ASC, id ASC",
            kind.column()
        ),
        [],
    )
}

/// Typed queries and mutations for the `body_measurements` table
#[derive(Debug, Clone)]
pub struct BodyMeasurementDao {
    db: Arc<Database>,
}

impl BodyMeasurementDao {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// All entries, newest first
    pub fn get_all(&self) -> TrackerResult<Vec<BodyMeasurement>> {
        self.db.read(all)
    }

    pub fn watch_all(&self) -> Subscription<Vec<BodyMeasurement>> {
        self.db.subscribe(&[Table::BodyMeasurements], all)
    }

    pub fn get_by_id(&self, id: BodyMeasurementId) -> TrackerResult<Option<BodyMeasurement>> {
        self.db.read(|conn| {
            query_optional(conn, &format!("{SELECT_MEASUREMENT} WHERE id = ?1"), [id])
        })
    }

    /// Entries dated within `[start, end]`, oldest first
    pub fn get_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> TrackerResult<Vec<BodyMeasurement>> {
        self.db.read(|conn| {
            query_all(
                conn,
                &format!(
                    "{SELECT_MEASUREMENT} WHERE date BETWEEN ?1 AND ?2 ORDER BY date ASC, id ASC"
                ),
                params![start.timestamp_millis(), end.timestamp_millis()],
            )
        })
    }

    /// Entries that carry `kind`, oldest first
    pub fn get_series(&self, kind: MeasurementType) -> TrackerResult<Vec<BodyMeasurement>> {
        self.db.read(|conn| series(conn, kind))
    }

    pub fn watch_series(&self, kind: MeasurementType) -> Subscription<Vec<BodyMeasurement>> {
        self.db
            .subscribe(&[Table::BodyMeasurements], move |conn| series(conn, kind))
    }

    /// The entry with the most recent date
    pub fn get_latest(&self) -> TrackerResult<Option<BodyMeasurement>> {
        self.db.read(|conn| {
            query_optional(
                conn,
                &format!("{SELECT_MEASUREMENT} ORDER BY date DESC, id DESC LIMIT 1"),
                [],
            )
        })
    }

    pub fn insert(&self, measurement: &BodyMeasurement) -> TrackerResult<BodyMeasurementId> {
        self.db.write(&[Table::BodyMeasurements], |conn| {
            conn.execute(
                "INSERT INTO body_measurements
                 (date, weight, waist, chest, biceps, forearm, thigh, calf, notes)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    measurement.date.timestamp_millis(),
                    measurement.weight,
                    measurement.waist,
                    measurement.chest,
                    measurement.biceps,
                    measurement.forearm,
                    measurement.thigh,
                    measurement.calf,
                    measurement.notes,
                ],
            )?;
            Ok(BodyMeasurementId::new(conn.last_insert_rowid()))
        })
    }

    pub fn update(&self, measurement: &BodyMeasurement) -> TrackerResult<()> {
        self.db.write(&[Table::BodyMeasurements], |conn| {
            conn.execute(
                "UPDATE body_measurements SET date = ?2, weight = ?3, waist = ?4, chest = ?5,
                 biceps = ?6, forearm = ?7, thigh = ?8, calf = ?9, notes = ?10
                 WHERE id = ?1",
                params![
                    measurement.id,
                    measurement.date.timestamp_millis(),
                    measurement.weight,
                    measurement.waist,
                    measurement.chest,
                    measurement.biceps,
                    measurement.forearm,
                    measurement.thigh,
                    measurement.calf,
                    measurement.notes,
                ],
            )?;
            Ok(())
        })
    }

    pub fn delete(&self, measurement: &BodyMeasurement) -> TrackerResult<()> {
        self.db.write(&[Table::BodyMeasurements], |conn| {
            conn.execute("DELETE FROM body_measurements WHERE id = ?1", [measurement.id])?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn setup() -> BodyMeasurementDao {
        BodyMeasurementDao::new(Arc::new(Database::open_in_memory().unwrap()))
    }

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, d, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_all_newest_first_and_range_oldest_first() {
        let dao = setup();
        for (d, kg) in [(1, 82.0), (8, 81.5), (15, 80.9)] {
            dao.insert(&BodyMeasurement::new(day(d)).with(MeasurementType::Weight, kg))
                .unwrap();
        }

        let all = dao.get_all().unwrap();
        assert_eq!(all[0].weight, Some(80.9));
        assert_eq!(all[2].weight, Some(82.0));

        let range = dao.get_by_date_range(day(1), day(8)).unwrap();
        let weights: Vec<_> = range.iter().map(|m| m.weight).collect();
        assert_eq!(weights, vec![Some(82.0), Some(81.5)]);
    }

    #[test]
    fn test_nullable_fields_round_trip() {
        let dao = setup();
        let mut entry = BodyMeasurement::new(day(3)).with(MeasurementType::Waist, 84.0);
        entry.notes = "morning".into();

        let id = dao.insert(&entry).unwrap();
        let loaded = dao.get_by_id(id).unwrap().unwrap();

        assert_eq!(loaded.waist, Some(84.0));
        assert_eq!(loaded.weight, None);
        assert_eq!(loaded.notes, "morning");
        assert_eq!(loaded.date, entry.date);
    }

    #[test]
    fn test_series_skips_rows_without_field() {
        let dao = setup();
        dao.insert(&BodyMeasurement::new(day(5)).with(MeasurementType::Biceps, 38.0))
            .unwrap();
        dao.insert(&BodyMeasurement::new(day(2)).with(MeasurementType::Weight, 80.0))
            .unwrap();
        dao.insert(&BodyMeasurement::new(day(1)).with(MeasurementType::Biceps, 37.5))
            .unwrap();

        let biceps = dao.get_series(MeasurementType::Biceps).unwrap();
        let values: Vec<_> = biceps.iter().map(|m| m.biceps).collect();
        assert_eq!(values, vec![Some(37.5), Some(38.0)]);
    }

    #[test]
    fn test_latest_and_delete() {
        let dao = setup();
        assert!(dao.get_latest().unwrap().is_none());

        dao.insert(&BodyMeasurement::new(day(1)).with(MeasurementType::Calf, 39.0))
            .unwrap();
        let mut newest = BodyMeasurement::new(day(9)).with(MeasurementType::Calf, 39.5);
        newest.id = dao.insert(&newest).unwrap();

        assert_eq!(dao.get_latest().unwrap(), Some(newest.clone()));

        dao.delete(&newest).unwrap();
        assert_eq!(dao.get_latest().unwrap().unwrap().calf, Some(39.0));
    }

    #[test]
    fn test_update_replaces_all_fields() {
        let dao = setup();
        let mut entry = BodyMeasurement::new(day(4)).with(MeasurementType::Chest, 100.0);
        entry.id = dao.insert(&entry).unwrap();

        entry.chest = None;
        entry.thigh = Some(58.0);
        dao.update(&entry).unwrap();

        let loaded = dao.get_by_id(entry.id).unwrap().unwrap();
        assert_eq!(loaded.chest, None);
        assert_eq!(loaded.thigh, Some(58.0));
    }
}
