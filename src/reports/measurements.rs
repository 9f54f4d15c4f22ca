//! Body measurement series

use chrono::{DateTime, Utc};

use crate::models::{BodyMeasurement, MeasurementType};

/// A single dated value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub date: DateTime<Utc>,
    pub value: f64,
}

/// One body metric over time
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementSeries {
    pub kind: MeasurementType,
    /// Points ordered by date
    pub points: Vec<SeriesPoint>,
}

impl MeasurementSeries {
    /// Collect the entries that carry `kind`, oldest first
    pub fn generate(measurements: &[BodyMeasurement], kind: MeasurementType) -> Self {
        let mut points: Vec<SeriesPoint> = measurements
            .iter()
            .filter_map(|m| m.get(kind).map(|value| SeriesPoint { date: m.date, value }))
            .collect();
        points.sort_by_key(|point| point.date);

        Self { kind, points }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn min(&self) -> Option<f64> {
        self.points.iter().map(|p| p.value).reduce(f64::min)
    }

    pub fn max(&self) -> Option<f64> {
        self.points.iter().map(|p| p.value).reduce(f64::max)
    }

    pub fn latest(&self) -> Option<SeriesPoint> {
        self.points.last().copied()
    }

    /// Latest value minus the first value
    pub fn change(&self) -> Option<f64> {
        let first = self.points.first()?;
        let last = self.points.last()?;
        Some(last.value - first.value)
    }

    /// Unit the values are recorded in
    pub fn unit(&self) -> &'static str {
        self.kind.unit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(day: u32) -> BodyMeasurement {
        BodyMeasurement::new(Utc.with_ymd_and_hms(2025, 5, day, 7, 0, 0).unwrap())
    }

    #[test]
    fn test_series_stats() {
        let measurements = vec![
            entry(20).with(MeasurementType::Weight, 79.5),
            entry(1).with(MeasurementType::Weight, 82.0),
            entry(10).with(MeasurementType::Waist, 86.0),
            entry(12).with(MeasurementType::Weight, 80.5),
        ];

        let series = MeasurementSeries::generate(&measurements, MeasurementType::Weight);
        let values: Vec<_> = series.points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![82.0, 80.5, 79.5]);
        assert_eq!(series.min(), Some(79.5));
        assert_eq!(series.max(), Some(82.0));
        assert_eq!(series.latest().unwrap().value, 79.5);
        assert_eq!(series.change(), Some(-2.5));
        assert_eq!(series.unit(), "kg");
    }

    #[test]
    fn test_empty_series() {
        let series = MeasurementSeries::generate(&[entry(1)], MeasurementType::Calf);
        assert!(series.is_empty());
        assert_eq!(series.change(), None);
        assert_eq!(series.unit(), "cm");
    }
}
