//! Body measurement repository

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::TrackerResult;
use crate::models::{BodyMeasurement, BodyMeasurementId, MeasurementType};
use crate::storage::{BodyMeasurementDao, Database, Subscription};

/// Repository for body measurements
#[derive(Debug, Clone)]
pub struct BodyMeasurementRepository {
    dao: BodyMeasurementDao,
}

impl BodyMeasurementRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            dao: BodyMeasurementDao::new(db),
        }
    }

    pub fn watch_all(&self) -> Subscription<Vec<BodyMeasurement>> {
        self.dao.watch_all()
    }

    pub fn get_all(&self) -> TrackerResult<Vec<BodyMeasurement>> {
        self.dao.get_all()
    }

    pub fn get_by_id(&self, id: BodyMeasurementId) -> TrackerResult<Option<BodyMeasurement>> {
        self.dao.get_by_id(id)
    }

    pub fn get_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> TrackerResult<Vec<BodyMeasurement>> {
        self.dao.get_by_date_range(start, end)
    }

    pub fn watch_series(&self, kind: MeasurementType) -> Subscription<Vec<BodyMeasurement>> {
        self.dao.watch_series(kind)
    }

    pub fn get_series(&self, kind: MeasurementType) -> TrackerResult<Vec<BodyMeasurement>> {
        self.dao.get_series(kind)
    }

    pub fn get_latest(&self) -> TrackerResult<Option<BodyMeasurement>> {
        self.dao.get_latest()
    }

    pub fn insert(&self, measurement: &BodyMeasurement) -> TrackerResult<BodyMeasurementId> {
        self.dao.insert(measurement)
    }

    pub fn update(&self, measurement: &BodyMeasurement) -> TrackerResult<()> {
        self.dao.update(measurement)
    }

    pub fn delete(&self, measurement: &BodyMeasurement) -> TrackerResult<()> {
        self.dao.delete(measurement)
    }
}
