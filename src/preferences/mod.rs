//! User preferences
//!
//! Scalar settings (theme, backup schedule, reminders) kept in a small JSON
//! file next to the database.

pub mod settings;
pub mod store;

pub use settings::{UserPreferences, DEFAULT_BACKUP_FREQUENCY_DAYS};
pub use store::{PreferencesStore, PreferencesSubscription};
