// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Wire contract for the spot registry and occupancy tracker services.
//!
//! This crate has no HTTP framework dependency; the server maps
//! [`ApiError::http_status`] onto its own status type.

mod dto;
mod errors;

pub use dto::{
    decode_body, DeleteConfirmation, SpotBody, VehicleMovementBody, VehicleRecordView,
    DELETED_MESSAGE,
};
pub use errors::{messages, ApiError, ApiErrorCode};

pub const CRATE_NAME: &str = "parkwise-api";

pub const ROUTE_PARKING_SPOTS: &str = "/api/parking-spots";
pub const ROUTE_PARKING_SPOTS_ALL: &str = "/api/parking-spots/all";
pub const ROUTE_VEHICLE_ENTRIES: &str = "/api/vehicle-entries";
pub const ROUTE_VEHICLE_EXITS: &str = "/api/vehicle-exits";
