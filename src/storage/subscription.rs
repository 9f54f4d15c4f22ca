//! Reactive read subscriptions
//!
//! Every write bumps a per-table generation counter published through a
//! `tokio::sync::watch` channel. A [`Subscription`] remembers the generations
//! it last delivered and re-runs its query whenever one of the tables it reads
//! has moved on.

use std::fmt;
use std::sync::Arc;

use rusqlite::Connection;
use tokio::sync::watch;

use super::database::Database;
use crate::error::{TrackerError, TrackerResult};

/// Tables whose changes can be observed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Exercises,
    Workouts,
    WorkoutExercises,
    ExerciseSets,
    WorkoutPlans,
    WorkoutPlanExercises,
    BodyMeasurements,
}

impl Table {
    pub(crate) const COUNT: usize = 7;

    fn index(self) -> usize {
        self as usize
    }
}

pub(crate) type Generations = [u64; Table::COUNT];

/// Publishes table generations to subscribers
#[derive(Debug)]
pub(crate) struct ChangeNotifier {
    tx: watch::Sender<Generations>,
}

impl ChangeNotifier {
    pub(crate) fn new() -> Self {
        let (tx, _rx) = watch::channel([0; Table::COUNT]);
        Self { tx }
    }

    /// Record a committed write to `tables`
    pub(crate) fn bump(&self, tables: &[Table]) {
        self.tx.send_modify(|generations| {
            for table in tables {
                generations[table.index()] += 1;
            }
        });
    }

    pub(crate) fn receiver(&self) -> watch::Receiver<Generations> {
        self.tx.subscribe()
    }
}

type QueryFn<T> = Box<dyn Fn(&Connection) -> TrackerResult<T> + Send + Sync>;

/// A live query over one or more tables.
///
/// The first delivery (from [`next`](Self::next) or [`poll`](Self::poll))
/// is the current snapshot; later deliveries happen only after a write to one
/// of the watched tables. Dropping the subscription or calling
/// [`cancel`](Self::cancel) stops delivery.
pub struct Subscription<T> {
    db: Arc<Database>,
    tables: Vec<Table>,
    query: QueryFn<T>,
    rx: watch::Receiver<Generations>,
    delivered: Option<Generations>,
}

impl<T> Subscription<T> {
    pub(crate) fn new(
        db: Arc<Database>,
        tables: &[Table],
        rx: watch::Receiver<Generations>,
        query: QueryFn<T>,
    ) -> Self {
        Self {
            db,
            tables: tables.to_vec(),
            query,
            rx,
            delivered: None,
        }
    }

    /// Tables this subscription reacts to
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Run the query now and treat the result as delivered
    pub fn current(&mut self) -> TrackerResult<T> {
        let generations = *self.rx.borrow_and_update();
        let snapshot = self.db.read(|conn| (self.query)(conn))?;
        self.delivered = Some(generations);
        Ok(snapshot)
    }

    /// Return a fresh snapshot if a watched table changed since the last delivery
    pub fn poll(&mut self) -> TrackerResult<Option<T>> {
        if self.has_pending_change() {
            self.current().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Wait for the next snapshot.
    ///
    /// Resolves immediately on the first call; afterwards waits until a write
    /// touches one of the watched tables.
    pub async fn next(&mut self) -> TrackerResult<T> {
        loop {
            if self.has_pending_change() {
                return self.current();
            }

            self.rx
                .changed()
                .await
                .map_err(|_| TrackerError::Storage("Change feed closed".into()))?;
        }
    }

    /// Stop receiving snapshots
    pub fn cancel(self) {}

    fn has_pending_change(&mut self) -> bool {
        let latest = *self.rx.borrow_and_update();
        match &self.delivered {
            None => true,
            Some(delivered) => self
                .tables
                .iter()
                .any(|table| latest[table.index()] != delivered[table.index()]),
        }
    }
}

impl<T> fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("tables", &self.tables)
            .field("delivered", &self.delivered)
            .finish()
    }
}
