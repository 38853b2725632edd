// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Parking domain model shared by the spot registry and the occupancy tracker.
//!
//! Availability is a closed two-value enum; the `yes`/`no` strings only exist
//! at the storage and wire boundary.

mod spot;
mod time;
mod vehicle;

pub use spot::{
    Availability, NewParkingSpot, ParkingSpot, SpotId, SpotNumber, SpotType, ValidationError,
};
pub use time::{
    format_timestamp, format_timestamp_opt, is_zero_timestamp, parse_stored_timestamp,
    stored_timestamp, STORED_TIMESTAMP_FORMAT, WIRE_TIMESTAMP_FORMAT,
};
pub use vehicle::{LicensePlate, VehicleRecord};

pub const CRATE_NAME: &str = "parkwise-model";
