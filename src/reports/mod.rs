//! Reports
//!
//! Chart-ready views computed from loaded data: exercise progression and
//! body measurement series.

pub mod measurements;
pub mod progression;

pub use measurements::{MeasurementSeries, SeriesPoint};
pub use progression::{ExerciseProgression, ProgressionPoint};
