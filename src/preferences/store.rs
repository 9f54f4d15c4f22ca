//! Persistent preferences store with live updates

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tokio::sync::watch;
use tracing::debug;

use super::settings::UserPreferences;
use crate::error::{TrackerError, TrackerResult};
use crate::storage::{read_json, write_json_atomic};

/// Key-value preferences backed by a JSON file
#[derive(Debug)]
pub struct PreferencesStore {
    path: PathBuf,
    tx: watch::Sender<UserPreferences>,
    write_lock: Mutex<()>,
}

impl PreferencesStore {
    /// Load preferences from `path`, or start from defaults if the file is absent
    pub fn open(path: impl Into<PathBuf>) -> TrackerResult<Self> {
        let path = path.into();
        let prefs: UserPreferences = read_json(&path)?;
        let (tx, _rx) = watch::channel(prefs);

        Ok(Self {
            path,
            tx,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current preference values
    pub fn snapshot(&self) -> UserPreferences {
        self.tx.borrow().clone()
    }

    /// Live view that yields the current values first, then each update
    pub fn subscribe(&self) -> PreferencesSubscription {
        PreferencesSubscription {
            rx: self.tx.subscribe(),
            started: false,
        }
    }

    pub fn update_dark_mode(&self, enabled: bool) -> TrackerResult<()> {
        self.update(|p| p.dark_mode = enabled)
    }

    pub fn update_dynamic_color(&self, enabled: bool) -> TrackerResult<()> {
        self.update(|p| p.dynamic_color = enabled)
    }

    pub fn update_auto_backup(&self, enabled: bool) -> TrackerResult<()> {
        self.update(|p| p.auto_backup = enabled)
    }

    pub fn update_backup_frequency(&self, days: i32) -> TrackerResult<()> {
        self.update(|p| p.backup_frequency = days)
    }

    /// Record a backup time in epoch milliseconds
    pub fn update_last_backup(&self, timestamp_millis: i64) -> TrackerResult<()> {
        self.update(|p| p.last_backup = timestamp_millis)
    }

    pub fn update_google_account(&self, account: impl Into<String>) -> TrackerResult<()> {
        let account = account.into();
        self.update(move |p| p.google_account = account)
    }

    pub fn update_notifications_enabled(&self, enabled: bool) -> TrackerResult<()> {
        self.update(|p| p.notifications_enabled = enabled)
    }

    pub fn update_workout_reminders(&self, enabled: bool) -> TrackerResult<()> {
        self.update(|p| p.workout_reminders = enabled)
    }

    pub fn update_measurement_reminders(&self, enabled: bool) -> TrackerResult<()> {
        self.update(|p| p.measurement_reminders = enabled)
    }

    /// Apply `change`, persist, then publish. Nothing is published if the write fails.
    fn update(&self, change: impl FnOnce(&mut UserPreferences)) -> TrackerResult<()> {
        let _guard = self.write_lock.lock().map_err(|e| {
            TrackerError::Storage(format!("Failed to acquire preferences lock: {}", e))
        })?;

        let mut next = self.snapshot();
        change(&mut next);
        write_json_atomic(&self.path, &next)?;

        debug!(path = %self.path.display(), "Saved preferences");
        self.tx.send_replace(next);
        Ok(())
    }
}

/// Live preference snapshots
#[derive(Debug)]
pub struct PreferencesSubscription {
    rx: watch::Receiver<UserPreferences>,
    started: bool,
}

impl PreferencesSubscription {
    /// Latest values, marking them as delivered
    pub fn current(&mut self) -> UserPreferences {
        self.started = true;
        self.rx.borrow_and_update().clone()
    }

    /// Values changed since the last delivery, if any
    pub fn poll(&mut self) -> Option<UserPreferences> {
        if !self.started || self.rx.has_changed().unwrap_or(false) {
            Some(self.current())
        } else {
            None
        }
    }

    /// Wait for the next snapshot; the first call resolves immediately
    pub async fn next(&mut self) -> TrackerResult<UserPreferences> {
        if self.started {
            self.rx
                .changed()
                .await
                .map_err(|_| TrackerError::Storage("Preferences store closed".into()))?;
        }
        Ok(self.current())
    }

    /// Stop receiving updates
    pub fn cancel(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let store = PreferencesStore::open(temp_dir.path().join("prefs.json")).unwrap();

        assert_eq!(store.snapshot(), UserPreferences::default());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_updates_persist_across_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prefs.json");

        {
            let store = PreferencesStore::open(&path).unwrap();
            store.update_dark_mode(true).unwrap();
            store.update_backup_frequency(14).unwrap();
            store.update_google_account("lifter@example.com").unwrap();
            store.update_last_backup(1_700_000_000_000).unwrap();
        }

        let store = PreferencesStore::open(&path).unwrap();
        let prefs = store.snapshot();
        assert!(prefs.dark_mode);
        assert_eq!(prefs.backup_frequency, 14);
        assert_eq!(prefs.google_account, "lifter@example.com");
        assert_eq!(prefs.last_backup, 1_700_000_000_000);
        assert!(prefs.dynamic_color);
    }

    #[test]
    fn test_every_key_has_an_updater() {
        let temp_dir = TempDir::new().unwrap();
        let store = PreferencesStore::open(temp_dir.path().join("prefs.json")).unwrap();

        store.update_dynamic_color(false).unwrap();
        store.update_auto_backup(true).unwrap();
        store.update_notifications_enabled(false).unwrap();
        store.update_workout_reminders(true).unwrap();
        store.update_measurement_reminders(true).unwrap();

        let prefs = store.snapshot();
        assert!(!prefs.dynamic_color);
        assert!(prefs.auto_backup);
        assert!(!prefs.notifications_enabled);
        assert!(prefs.workout_reminders);
        assert!(prefs.measurement_reminders);
    }

    #[test]
    fn test_subscription_poll() {
        let temp_dir = TempDir::new().unwrap();
        let store = PreferencesStore::open(temp_dir.path().join("prefs.json")).unwrap();
        let mut sub = store.subscribe();

        assert_eq!(sub.poll(), Some(UserPreferences::default()));
        assert_eq!(sub.poll(), None);

        store.update_workout_reminders(true).unwrap();
        assert!(sub.poll().unwrap().workout_reminders);
        assert_eq!(sub.poll(), None);
    }

    #[tokio::test]
    async fn test_subscription_next() {
        let temp_dir = TempDir::new().unwrap();
        let store = PreferencesStore::open(temp_dir.path().join("prefs.json")).unwrap();
        let mut sub = store.subscribe();

        assert!(!sub.next().await.unwrap().dark_mode);

        store.update_dark_mode(true).unwrap();
        assert!(sub.next().await.unwrap().dark_mode);
        sub.cancel();
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prefs.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(PreferencesStore::open(&path).is_err());
    }
}
