//! Body measurement model
//!
//! A measurement entry records any subset of seven body metrics on a date.

use chrono::serde::ts_milliseconds;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::BodyMeasurementId;

/// A dated set of body metrics; weight in kg, circumferences in cm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyMeasurement {
    #[serde(default)]
    pub id: BodyMeasurementId,

    #[serde(with = "ts_milliseconds", default)]
    pub date: DateTime<Utc>,

    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub waist: Option<f64>,
    #[serde(default)]
    pub chest: Option<f64>,
    #[serde(default)]
    pub biceps: Option<f64>,
    #[serde(default)]
    pub forearm: Option<f64>,
    #[serde(default)]
    pub thigh: Option<f64>,
    #[serde(default)]
    pub calf: Option<f64>,

    #[serde(default)]
    pub notes: String,
}

impl BodyMeasurement {
    /// Create an empty, unsaved entry for `date`
    pub fn new(date: DateTime<Utc>) -> Self {
        Self {
            id: BodyMeasurementId::UNSAVED,
            date,
            weight: None,
            waist: None,
            chest: None,
            biceps: None,
            forearm: None,
            thigh: None,
            calf: None,
            notes: String::new(),
        }
    }

    /// Set one metric, builder style
    pub fn with(mut self, kind: MeasurementType, value: f64) -> Self {
        self.set(kind, Some(value));
        self
    }

    /// Read one metric
    pub fn get(&self, kind: MeasurementType) -> Option<f64> {
        match kind {
            MeasurementType::Weight => self.weight,
            MeasurementType::Waist => self.waist,
            MeasurementType::Chest => self.chest,
            MeasurementType::Biceps => self.biceps,
            MeasurementType::Forearm => self.forearm,
            MeasurementType::Thigh => self.thigh,
            MeasurementType::Calf => self.calf,
        }
    }

    /// Write one metric
    pub fn set(&mut self, kind: MeasurementType, value: Option<f64>) {
        let slot = match kind {
            MeasurementType::Weight => &mut self.weight,
            MeasurementType::Waist => &mut self.waist,
            MeasurementType::Chest => &mut self.chest,
            MeasurementType::Biceps => &mut self.biceps,
            MeasurementType::Forearm => &mut self.forearm,
            MeasurementType::Thigh => &mut self.thigh,
            MeasurementType::Calf => &mut self.calf,
        };
        *slot = value;
    }

    /// Whether at least one metric is present
    pub fn has_any_value(&self) -> bool {
        MeasurementType::ALL.iter().any(|kind| self.get(*kind).is_some())
    }

    /// Copy of this entry with its id cleared
    pub fn as_new(&self) -> Self {
        Self {
            id: BodyMeasurementId::UNSAVED,
            ..self.clone()
        }
    }

    /// Check the entry before creating it.
    ///
    /// The store accepts empty rows; callers creating a new entry are expected
    /// to run this first.
    pub fn validate(&self) -> Result<(), MeasurementValidationError> {
        if !self.has_any_value() {
            return Err(MeasurementValidationError::NoValues);
        }

        if let Some(kind) = MeasurementType::ALL
            .iter()
            .copied()
            .find(|kind| self.get(*kind).is_some_and(|v| !v.is_finite() || v < 0.0))
        {
            return Err(MeasurementValidationError::InvalidValue(kind));
        }

        Ok(())
    }
}

/// The seven tracked body metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementType {
    Weight,
    Waist,
    Chest,
    Biceps,
    Forearm,
    Thigh,
    Calf,
}

impl MeasurementType {
    pub const ALL: [MeasurementType; 7] = [
        Self::Weight,
        Self::Waist,
        Self::Chest,
        Self::Biceps,
        Self::Forearm,
        Self::Thigh,
        Self::Calf,
    ];

    /// Column name in the `body_measurements` table
    pub fn column(&self) -> &'static str {
        match self {
            Self::Weight => "weight",
            Self::Waist => "waist",
            Self::Chest => "chest",
            Self::Biceps => "biceps",
            Self::Forearm => "forearm",
            Self::Thigh => "thigh",
            Self::Calf => "calf",
        }
    }

    /// Unit the value is recorded in
    pub fn unit(&self) -> &'static str {
        match self {
            Self::Weight => "kg",
            _ => "cm",
        }
    }

    /// Parse a measurement type from string
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.column().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for MeasurementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Weight => "Weight",
            Self::Waist => "Waist",
            Self::Chest => "Chest",
            Self::Biceps => "Biceps",
            Self::Forearm => "Forearm",
            Self::Thigh => "Thigh",
            Self::Calf => "Calf",
        };
        write!(f, "{}", name)
    }
}

/// Validation errors for body measurements
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeasurementValidationError {
    NoValues,
    InvalidValue(MeasurementType),
}

impl fmt::Display for MeasurementValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoValues => write!(f, "At least one measurement value is required"),
            Self::InvalidValue(kind) => write!(f, "{} must be a non-negative number", kind),
        }
    }
}

impl std::error::Error for MeasurementValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_measurement_fails_validation() {
        let entry = BodyMeasurement::new(Utc::now());
        assert!(!entry.has_any_value());
        assert_eq!(entry.validate(), Err(MeasurementValidationError::NoValues));
    }

    #[test]
    fn test_single_value_is_enough() {
        let entry = BodyMeasurement::new(Utc::now()).with(MeasurementType::Calf, 38.5);
        assert!(entry.validate().is_ok());
        assert_eq!(entry.get(MeasurementType::Calf), Some(38.5));
        assert_eq!(entry.get(MeasurementType::Weight), None);
    }

    #[test]
    fn test_negative_value_rejected() {
        let entry = BodyMeasurement::new(Utc::now()).with(MeasurementType::Waist, -1.0);
        assert_eq!(
            entry.validate(),
            Err(MeasurementValidationError::InvalidValue(MeasurementType::Waist))
        );
    }

    #[test]
    fn test_measurement_type_metadata() {
        assert_eq!(MeasurementType::Weight.unit(), "kg");
        assert_eq!(MeasurementType::Thigh.unit(), "cm");
        assert_eq!(MeasurementType::parse("BICEPS"), Some(MeasurementType::Biceps));
        assert_eq!(MeasurementType::parse("neck"), None);
    }
}
