//! Reservation store: the database plus the published snapshot.
//!
//! Every successful write re-reads the table and publishes a new snapshot,
//! so readers only ever see complete reservation sets. Writes hold the
//! write lock from the SQL statement until the snapshot is published, so
//! the last published snapshot always reflects the last write.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tracing::{info, warn};

use cabana_common::snapshot::{Snapshot, SnapshotCell};
use cabana_common::{Reservation, ReservationError};

use super::db;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid reservation: {0}")]
    Invalid(#[from] ReservationError),

    #[error("reservation {0} does not exist")]
    NotFound(String),

    #[error(transparent)]
    Db(#[from] anyhow::Error),
}

#[derive(Debug, Clone)]
pub struct ReservationStore {
    db_path: PathBuf,
    snapshots: Arc<SnapshotCell>,
    write_lock: Arc<Mutex<()>>,
}

impl ReservationStore {
    /// Create the schema if needed and publish the initial snapshot.
    pub fn open(db_path: &Path) -> Result<Self, StoreError> {
        db::initialize(db_path)?;
        let store = ReservationStore {
            db_path: db_path.to_path_buf(),
            snapshots: Arc::new(SnapshotCell::new()),
            write_lock: Arc::new(Mutex::new(())),
        };
        let revision = store.reload()?;
        info!(
            "Loaded {} reservations from {} (r{revision})",
            store.snapshot().reservations.len(),
            db_path.display()
        );
        Ok(store)
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Re-read the table and publish it. Returns the new revision.
    pub fn reload(&self) -> Result<u64, StoreError> {
        let _guard = self.lock();
        self.publish_table()
    }

    /// Caller must hold the write lock.
    fn publish_table(&self) -> Result<u64, StoreError> {
        let reservations = db::list(&self.db_path)?;
        for r in reservations.iter().filter(|r| !r.is_well_formed()) {
            warn!("Stored reservation {} has check-out on or before check-in", r.id);
        }
        Ok(self.snapshots.publish(reservations))
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.snapshots.current()
    }

    pub fn revision(&self) -> u64 {
        self.snapshots.revision()
    }

    /// Validate and store a new reservation; returns its id.
    pub fn create(&self, reservation: &Reservation) -> Result<String, StoreError> {
        reservation.validate()?;
        let _guard = self.lock();
        let id = db::insert(&self.db_path, reservation)?;
        info!("Created reservation {id} for {}", reservation.guest_name);
        self.publish_table()?;
        Ok(id)
    }

    pub fn update(&self, reservation: &Reservation) -> Result<(), StoreError> {
        reservation.validate()?;
        let _guard = self.lock();
        if !db::update(&self.db_path, reservation)? {
            return Err(StoreError::NotFound(reservation.id.clone()));
        }
        info!("Updated reservation {}", reservation.id);
        self.publish_table()?;
        Ok(())
    }

    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        let _guard = self.lock();
        if !db::delete(&self.db_path, id)? {
            return Err(StoreError::NotFound(id.to_string()));
        }
        info!("Deleted reservation {id}");
        self.publish_table()?;
        Ok(())
    }
}
