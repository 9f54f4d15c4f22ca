//! Database handle
//!
//! One SQLite connection behind a mutex plus the change feed that drives
//! subscriptions. The handle is created explicitly and shared as
//! `Arc<Database>` by every DAO.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;
use tracing::info;

use super::schema;
use super::subscription::{ChangeNotifier, Subscription, Table};
use crate::error::{TrackerError, TrackerResult};

/// Shared handle to the embedded store
#[derive(Debug)]
pub struct Database {
    conn: Mutex<Connection>,
    changes: ChangeNotifier,
}

impl Database {
    /// Open or create the database file and bring its schema up to date
    pub fn open(path: impl AsRef<Path>) -> TrackerResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                TrackerError::Io(format!("Failed to create database directory: {}", e))
            })?;
        }

        let conn = Connection::open(path)
            .map_err(|e| TrackerError::Database(format!("Failed to open database: {}", e)))?;
        conn.query_row("PRAGMA journal_mode = WAL", [], |_| Ok(()))
            .map_err(|e| TrackerError::Database(format!("Failed to enable WAL: {}", e)))?;

        info!(path = %path.display(), "Opened workout database");
        Self::from_connection(conn)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> TrackerResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| {
            TrackerError::Database(format!("Failed to open in-memory database: {}", e))
        })?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> TrackerResult<Self> {
        schema::configure(&conn)?;
        schema::migrate(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
            changes: ChangeNotifier::new(),
        })
    }

    fn lock(&self) -> TrackerResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| {
            TrackerError::Storage(format!("Failed to acquire connection lock: {}", e))
        })
    }

    /// Run read-only statements under the connection lock
    pub(crate) fn read<T>(
        &self,
        f: impl FnOnce(&Connection) -> TrackerResult<T>,
    ) -> TrackerResult<T> {
        let conn = self.lock()?;
        f(&conn)
    }

    /// Run mutating statements, then notify subscribers of `tables`
    pub(crate) fn write<T>(
        &self,
        tables: &[Table],
        f: impl FnOnce(&Connection) -> TrackerResult<T>,
    ) -> TrackerResult<T> {
        let result = {
            let conn = self.lock()?;
            f(&conn)?
        };
        self.changes.bump(tables);
        Ok(result)
    }

    /// Create a subscription that re-runs `query` after writes to `tables`
    pub fn subscribe<T, F>(self: &Arc<Self>, tables: &[Table], query: F) -> Subscription<T>
    where
        F: Fn(&Connection) -> TrackerResult<T> + Send + Sync + 'static,
    {
        Subscription::new(
            Arc::clone(self),
            tables,
            self.changes.receiver(),
            Box::new(query),
        )
    }

    #[cfg(test)]
    pub(crate) fn execute_batch(&self, sql: &str) -> TrackerResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(sql)?;
        Ok(())
    }
}
