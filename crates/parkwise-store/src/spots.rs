// SPDX-License-Identifier: Apache-2.0

use parkwise_model::{Availability, NewParkingSpot, ParkingSpot, SpotId, SpotNumber, SpotType};
use rusqlite::{params, OptionalExtension, Row};

use crate::{ParkingStore, StoreError};

const SPOT_COLUMNS: &str = "id, spot_number, type, is_available";

struct SpotRow {
    id: i64,
    spot_number: Option<String>,
    spot_type: Option<String>,
    is_available: Option<String>,
}

impl SpotRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            spot_number: row.get(1)?,
            spot_type: row.get(2)?,
            is_available: row.get(3)?,
        })
    }

    fn decode(self) -> Result<ParkingSpot, StoreError> {
        let spot_type = SpotType::parse(self.spot_type.as_deref().unwrap_or_default())
            .map_err(|e| StoreError::Corrupt(format!("parking_spots.id={}: {e}", self.id)))?;
        let is_available = Availability::parse(self.is_available.as_deref().unwrap_or_default())
            .map_err(|e| StoreError::Corrupt(format!("parking_spots.id={}: {e}", self.id)))?;
        Ok(ParkingSpot {
            id: SpotId::new(self.id),
            spot_number: SpotNumber::new(self.spot_number.unwrap_or_default()),
            spot_type,
            is_available,
        })
    }
}

impl ParkingStore {
    pub fn create_spot(&self, spot: NewParkingSpot) -> Result<ParkingSpot, StoreError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO parking_spots (spot_number, type, is_available) VALUES (?1, ?2, ?3)",
                params![
                    spot.spot_number.as_str(),
                    spot.spot_type.as_str(),
                    spot.is_available.as_str()
                ],
            )?;
            let id = SpotId::new(conn.last_insert_rowid());
            Ok(spot.with_id(id))
        })
    }

    pub fn get_spot(&self, id: SpotId) -> Result<ParkingSpot, StoreError> {
        self.with_conn(|conn| {
            conn.query_row(
                &format!("SELECT {SPOT_COLUMNS} FROM parking_spots WHERE id = ?1"),
                params![id.get()],
                SpotRow::read,
            )
            .optional()?
            .ok_or(StoreError::SpotNotFound(id))?
            .decode()
        })
    }

    /// Every spot in ascending id order.
    pub fn list_spots(&self) -> Result<Vec<ParkingSpot>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {SPOT_COLUMNS} FROM parking_spots ORDER BY id"))?;
            let rows = stmt.query_map([], SpotRow::read)?;
            let mut spots = Vec::new();
            for row in rows {
                spots.push(row?.decode()?);
            }
            Ok(spots)
        })
    }

    /// Full replace of number, type and flag.
    ///
    /// Setting the flag here bypasses the occupancy transitions; the open
    /// record index still refuses a second open record for the spot.
    pub fn update_spot(&self, id: SpotId, spot: NewParkingSpot) -> Result<ParkingSpot, StoreError> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE parking_spots SET spot_number = ?1, type = ?2, is_available = ?3 WHERE id = ?4",
                params![
                    spot.spot_number.as_str(),
                    spot.spot_type.as_str(),
                    spot.is_available.as_str(),
                    id.get()
                ],
            )?;
            if changed == 0 {
                return Err(StoreError::SpotNotFound(id));
            }
            Ok(spot.with_id(id))
        })
    }

    pub fn delete_spot(&self, id: SpotId) -> Result<(), StoreError> {
        self.with_conn(|conn| {
            let removed = conn.execute("DELETE FROM parking_spots WHERE id = ?1", params![id.get()])?;
            if removed == 0 {
                return Err(StoreError::SpotNotFound(id));
            }
            Ok(())
        })
    }
}
