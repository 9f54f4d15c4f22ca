//! Configuration module
//!
//! This module provides configuration management including:
//! - Platform-aware path resolution
//! - Environment overrides for the data directory and log filter

pub mod paths;

pub use paths::TrackerPaths;
