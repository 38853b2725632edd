// SPDX-License-Identifier: Apache-2.0

use parkwise_model::{
    format_timestamp_opt, Availability, LicensePlate, NewParkingSpot, SpotNumber, VehicleRecord,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::errors::{messages, ApiError};

pub const DELETED_MESSAGE: &str = "Parking spot has been deleted successfully.";

/// Decodes a JSON request body; any malformed payload becomes a 400 carrying
/// `invalid_message`.
pub fn decode_body<T: DeserializeOwned>(bytes: &[u8], invalid_message: &str) -> Result<T, ApiError> {
    serde_json::from_slice(bytes).map_err(|_| ApiError::validation(invalid_message))
}

/// Body of `POST /api/parking-spots` and `PUT /api/parking-spots/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotBody {
    #[serde(default)]
    pub spot_number: String,
    #[serde(rename = "type", default)]
    pub spot_type: String,
    pub is_available: Availability,
}

impl SpotBody {
    pub fn into_new_spot(self) -> Result<NewParkingSpot, ApiError> {
        NewParkingSpot::new(&self.spot_number, &self.spot_type, self.is_available)
            .map_err(|_| ApiError::validation(messages::INVALID_PARKING_SPOT))
    }
}

/// Body of both `POST /api/vehicle-entries` and `POST /api/vehicle-exits`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleMovementBody {
    #[serde(default)]
    pub spot_number: String,
    #[serde(default)]
    pub license_plate: String,
}

impl VehicleMovementBody {
    pub fn parse(&self) -> Result<(SpotNumber, LicensePlate), ApiError> {
        let spot = SpotNumber::parse(&self.spot_number)
            .map_err(|e| ApiError::validation(format!("{}: {e}", messages::INVALID_INPUT)))?;
        let plate = LicensePlate::parse(&self.license_plate)
            .map_err(|e| ApiError::validation(format!("{}: {e}", messages::INVALID_INPUT)))?;
        Ok((spot, plate))
    }
}

/// Client-facing vehicle record with day-first timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleRecordView {
    pub id: i64,
    pub spot_number: String,
    pub license_plate: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_time: Option<String>,
}

impl From<&VehicleRecord> for VehicleRecordView {
    fn from(record: &VehicleRecord) -> Self {
        Self {
            id: record.id,
            spot_number: record.spot_number.as_str().to_string(),
            license_plate: record.license_plate.as_str().to_string(),
            entry_time: format_timestamp_opt(record.entry_time.as_ref()),
            exit_time: format_timestamp_opt(record.exit_time.as_ref()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteConfirmation {
    pub message: String,
}

impl Default for DeleteConfirmation {
    fn default() -> Self {
        Self {
            message: DELETED_MESSAGE.to_string(),
        }
    }
}
