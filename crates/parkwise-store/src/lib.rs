// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! SQLite persistence for parking spots and vehicle records.
//!
//! Both services open the same database file. Entry and exit run inside
//! `BEGIN IMMEDIATE` transactions, and a unique partial index keeps at most
//! one open record per spot number even across processes.

use parkwise_model::{SpotId, SpotNumber};
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;

mod clock;
mod occupancy;
mod schema;
mod spots;

pub use clock::{Clock, FixedClock, SystemClock};
pub use schema::{OPEN_RECORD_INDEX, SCHEMA_SQL};

pub const CRATE_NAME: &str = "parkwise-store";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("parking spot {0} not found")]
    SpotNotFound(SpotId),
    #[error("no parking spot with number '{0}'")]
    SpotNumberNotFound(SpotNumber),
    #[error("parking spot '{0}' is occupied")]
    SpotOccupied(SpotNumber),
    #[error("no open vehicle record for spot '{spot}' and plate '{plate}'")]
    OpenRecordNotFound { spot: String, plate: String },
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("corrupt row: {0}")]
    Corrupt(String),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("store connection lock poisoned")]
    Poisoned,
}

#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub busy_timeout: Duration,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            busy_timeout: Duration::from_millis(5000),
        }
    }
}

/// Handle over the shared parking database.
///
/// Constructed once per process and injected into the HTTP layer; there is
/// no global connection.
pub struct ParkingStore {
    conn: Mutex<Connection>,
    clock: Arc<dyn Clock>,
}

impl ParkingStore {
    /// Opens (creating if needed) a file-backed store and bootstraps the
    /// schema.
    pub fn open(
        path: &Path,
        options: &StoreOptions,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.busy_timeout(options.busy_timeout)?;
        schema::apply_file_pragmas(&conn)?;
        schema::bootstrap(&conn)?;
        tracing::debug!(path = %path.display(), "parking store opened");
        Ok(Self {
            conn: Mutex::new(conn),
            clock,
        })
    }

    pub fn open_in_memory(clock: Arc<dyn Clock>) -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        schema::bootstrap(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            clock,
        })
    }

    fn with_conn<T>(
        &self,
        f: impl FnOnce(&mut Connection) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut guard = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        f(&mut guard)
    }
}

impl std::fmt::Debug for ParkingStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParkingStore").finish_non_exhaustive()
    }
}

pub(crate) fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}
