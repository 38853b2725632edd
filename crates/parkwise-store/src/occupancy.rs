// SPDX-License-Identifier: Apache-2.0

use chrono::NaiveDateTime;
use parkwise_model::{
    parse_stored_timestamp, stored_timestamp, Availability, LicensePlate, SpotNumber,
    VehicleRecord,
};
use rusqlite::{params, OptionalExtension, Row, Transaction, TransactionBehavior};
use tracing::{debug, info};

use crate::{is_constraint_violation, ParkingStore, StoreError};

const RECORD_COLUMNS: &str = "id, spot_number, license_plate, entry_time, exit_time";

struct RecordRow {
    id: i64,
    spot_number: Option<String>,
    license_plate: Option<String>,
    entry_time: Option<String>,
    exit_time: Option<String>,
}

impl RecordRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            spot_number: row.get(1)?,
            license_plate: row.get(2)?,
            entry_time: row.get(3)?,
            exit_time: row.get(4)?,
        })
    }

    fn decode(self) -> Result<VehicleRecord, StoreError> {
        let id = self.id;
        let corrupt = |e: parkwise_model::ValidationError| {
            StoreError::Corrupt(format!("vehicle_records.id={id}: {e}"))
        };
        Ok(VehicleRecord {
            id,
            spot_number: SpotNumber::new(self.spot_number.unwrap_or_default()),
            license_plate: LicensePlate::parse(self.license_plate.as_deref().unwrap_or_default())
                .map_err(corrupt)?,
            entry_time: decode_time(self.entry_time.as_deref()).map_err(corrupt)?,
            exit_time: decode_time(self.exit_time.as_deref()).map_err(corrupt)?,
        })
    }
}

fn decode_time(raw: Option<&str>) -> Result<Option<NaiveDateTime>, parkwise_model::ValidationError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => parse_stored_timestamp(s).map(Some),
        None => Ok(None),
    }
}

/// Flag of the lowest-id spot carrying this number. Labels are not unique,
/// so the oldest spot decides.
fn spot_flag(tx: &Transaction<'_>, spot: &SpotNumber) -> Result<Availability, StoreError> {
    let raw: Option<Option<String>> = tx
        .query_row(
            "SELECT is_available FROM parking_spots WHERE spot_number = ?1 ORDER BY id LIMIT 1",
            params![spot.as_str()],
            |r| r.get(0),
        )
        .optional()?;
    let raw = raw.ok_or_else(|| StoreError::SpotNumberNotFound(spot.clone()))?;
    Availability::parse(raw.as_deref().unwrap_or_default())
        .map_err(|e| StoreError::Corrupt(format!("parking_spots.spot_number={spot}: {e}")))
}

/// Flips every spot row sharing the number, keeping duplicates in step.
fn set_flag(tx: &Transaction<'_>, spot: &SpotNumber, flag: Availability) -> Result<(), StoreError> {
    tx.execute(
        "UPDATE parking_spots SET is_available = ?1 WHERE spot_number = ?2",
        params![flag.as_str(), spot.as_str()],
    )?;
    Ok(())
}

impl ParkingStore {
    /// Checks the spot in, opening a record and marking the spot occupied.
    ///
    /// Read-check-insert-update runs in one immediate transaction; any error
    /// rolls the whole sequence back.
    pub fn enter(
        &self,
        spot: &SpotNumber,
        plate: &LicensePlate,
    ) -> Result<VehicleRecord, StoreError> {
        let entry_time = self.clock.now();
        self.with_conn(|conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            if !spot_flag(&tx, spot)?.is_available() {
                return Err(StoreError::SpotOccupied(spot.clone()));
            }
            let inserted = tx.execute(
                "INSERT INTO vehicle_records (spot_number, license_plate, entry_time) VALUES (?1, ?2, ?3)",
                params![spot.as_str(), plate.as_str(), stored_timestamp(&entry_time)],
            );
            match inserted {
                Ok(_) => {}
                // Flag said available but an open record exists (manual
                // flag edit); the index wins.
                Err(e) if is_constraint_violation(&e) => {
                    return Err(StoreError::SpotOccupied(spot.clone()));
                }
                Err(e) => return Err(e.into()),
            }
            let id = tx.last_insert_rowid();
            set_flag(&tx, spot, Availability::Occupied)?;
            tx.commit()?;
            info!(spot_number = %spot, record_id = id, "vehicle entered");
            Ok(VehicleRecord {
                id,
                spot_number: spot.clone(),
                license_plate: plate.clone(),
                entry_time: Some(entry_time),
                exit_time: None,
            })
        })
    }

    /// Closes the open record for this spot and plate and frees the spot.
    pub fn exit(
        &self,
        spot: &SpotNumber,
        plate: &LicensePlate,
    ) -> Result<VehicleRecord, StoreError> {
        let exit_time = self.clock.now();
        self.with_conn(|conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            let open = tx
                .query_row(
                    &format!(
                        "SELECT {RECORD_COLUMNS} FROM vehicle_records
                         WHERE spot_number = ?1 AND license_plate = ?2 AND exit_time IS NULL
                         ORDER BY id LIMIT 1"
                    ),
                    params![spot.as_str(), plate.as_str()],
                    RecordRow::read,
                )
                .optional()?
                .ok_or_else(|| StoreError::OpenRecordNotFound {
                    spot: spot.as_str().to_string(),
                    plate: plate.as_str().to_string(),
                })?
                .decode()?;
            tx.execute(
                "UPDATE vehicle_records SET exit_time = ?1 WHERE id = ?2",
                params![stored_timestamp(&exit_time), open.id],
            )?;
            set_flag(&tx, spot, Availability::Available)?;
            tx.commit()?;
            info!(spot_number = %spot, record_id = open.id, "vehicle exited");
            Ok(VehicleRecord {
                exit_time: Some(exit_time),
                ..open
            })
        })
    }

    /// First record (lowest id) ever written for the spot number.
    ///
    /// Returns at most one record even when the spot has history. Query
    /// failures surface as [`StoreError::Sqlite`], undecodable rows as
    /// [`StoreError::Corrupt`].
    pub fn records_for_spot(&self, spot: &SpotNumber) -> Result<Vec<VehicleRecord>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {RECORD_COLUMNS} FROM vehicle_records WHERE spot_number = ?1 ORDER BY id LIMIT 1"
            ))?;
            let mut rows = stmt.query(params![spot.as_str()])?;
            let mut out = Vec::with_capacity(1);
            if let Some(row) = rows.next()? {
                let record = RecordRow::read(row)
                    .map_err(|e| StoreError::Corrupt(e.to_string()))?
                    .decode()?;
                out.push(record);
            }
            debug!(spot_number = %spot, found = out.len(), "vehicle records lookup");
            Ok(out)
        })
    }

    #[cfg(test)]
    pub(crate) fn open_record_for_spot(
        &self,
        spot: &SpotNumber,
    ) -> Result<Option<VehicleRecord>, StoreError> {
        self.with_conn(|conn| {
            conn.query_row(
                &format!(
                    "SELECT {RECORD_COLUMNS} FROM vehicle_records
                     WHERE spot_number = ?1 AND exit_time IS NULL"
                ),
                params![spot.as_str()],
                RecordRow::read,
            )
            .optional()?
            .map(RecordRow::decode)
            .transpose()
        })
    }
}
