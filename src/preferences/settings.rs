//! User preference values
//!
//! Stored as a flat JSON object. Keys missing from the file take their
//! defaults, so older files keep loading as new keys are added.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Days between automatic backups unless the user picks otherwise
pub const DEFAULT_BACKUP_FREQUENCY_DAYS: i32 = 7;

/// Snapshot of every user preference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    #[serde(default)]
    pub dark_mode: bool,

    #[serde(default = "default_true")]
    pub dynamic_color: bool,

    #[serde(default)]
    pub auto_backup: bool,

    /// Days between automatic backups
    #[serde(default = "default_backup_frequency")]
    pub backup_frequency: i32,

    /// Epoch milliseconds of the last backup, `0` if none was made
    #[serde(default)]
    pub last_backup: i64,

    #[serde(default)]
    pub google_account: String,

    #[serde(default = "default_true")]
    pub notifications_enabled: bool,

    #[serde(default)]
    pub workout_reminders: bool,

    #[serde(default)]
    pub measurement_reminders: bool,
}

fn default_true() -> bool {
    true
}

fn default_backup_frequency() -> i32 {
    DEFAULT_BACKUP_FREQUENCY_DAYS
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            dark_mode: false,
            dynamic_color: true,
            auto_backup: false,
            backup_frequency: DEFAULT_BACKUP_FREQUENCY_DAYS,
            last_backup: 0,
            google_account: String::new(),
            notifications_enabled: true,
            workout_reminders: false,
            measurement_reminders: false,
        }
    }
}

impl UserPreferences {
    /// When the last backup was made, if ever
    pub fn last_backup_time(&self) -> Option<DateTime<Utc>> {
        if self.last_backup <= 0 {
            return None;
        }
        DateTime::from_timestamp_millis(self.last_backup)
    }

    /// Whether an automatic backup should run at `now`
    pub fn is_backup_due(&self, now: DateTime<Utc>) -> bool {
        if !self.auto_backup {
            return false;
        }

        let Some(last) = self.last_backup_time() else {
            return true;
        };

        if self.backup_frequency <= 0 {
            return true;
        }

        now - last >= Duration::days(i64::from(self.backup_frequency))
    }
}
