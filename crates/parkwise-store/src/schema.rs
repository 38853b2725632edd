// SPDX-License-Identifier: Apache-2.0

use rusqlite::Connection;

use crate::StoreError;

pub const OPEN_RECORD_INDEX: &str = "idx_vehicle_records_open_spot";

/// Created if absent at startup; this is the only migration step.
pub const SCHEMA_SQL: &str = "
    CREATE TABLE IF NOT EXISTS parking_spots (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      spot_number TEXT,
      type TEXT,
      is_available TEXT CHECK (is_available IN ('yes', 'no'))
    );
    CREATE TABLE IF NOT EXISTS vehicle_records (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      spot_number TEXT,
      license_plate TEXT,
      entry_time TEXT,
      exit_time TEXT
    );
    CREATE INDEX IF NOT EXISTS idx_parking_spots_spot_number
      ON parking_spots(spot_number);
    CREATE INDEX IF NOT EXISTS idx_vehicle_records_spot_number
      ON vehicle_records(spot_number);
    CREATE UNIQUE INDEX IF NOT EXISTS idx_vehicle_records_open_spot
      ON vehicle_records(spot_number) WHERE exit_time IS NULL;
";

pub(crate) fn apply_file_pragmas(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
    Ok(())
}

pub(crate) fn bootstrap(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
