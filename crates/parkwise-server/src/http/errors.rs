// SPDX-License-Identifier: Apache-2.0

use axum::http::header::{ACCEPT, CONTENT_TYPE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use parkwise_api::{messages, ApiError};
use parkwise_store::StoreError;
use serde_json::json;
use tracing::{error, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StoreOp {
    CreateSpot,
    ReadSpot,
    ListSpots,
    UpdateSpot,
    DeleteSpot,
    Entry,
    Exit,
    Lookup,
}

impl StoreOp {
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::CreateSpot => "create_spot",
            Self::ReadSpot => "read_spot",
            Self::ListSpots => "list_spots",
            Self::UpdateSpot => "update_spot",
            Self::DeleteSpot => "delete_spot",
            Self::Entry => "vehicle_entry",
            Self::Exit => "vehicle_exit",
            Self::Lookup => "vehicle_lookup",
        }
    }
}

pub(crate) fn map_store_error(op: StoreOp, err: StoreError) -> ApiError {
    let mapped = match (&err, op) {
        (StoreError::SpotNotFound(_) | StoreError::SpotNumberNotFound(_), _) => {
            ApiError::not_found(messages::SPOT_NOT_FOUND)
        }
        (StoreError::SpotOccupied(_), _) => ApiError::conflict(messages::SPOT_NOT_AVAILABLE),
        (StoreError::OpenRecordNotFound { .. }, _) => {
            ApiError::not_found(messages::ACTIVE_ENTRY_NOT_FOUND)
        }
        (StoreError::Corrupt(_), StoreOp::Lookup) => {
            ApiError::internal(messages::ENTRY_SCAN_FAILED)
        }
        // A lookup that cannot run reads as "nothing there".
        (_, StoreOp::Lookup) => ApiError::not_found(messages::SPOT_NOT_FOUND),
        (_, StoreOp::CreateSpot) => ApiError::internal(messages::SPOT_CREATE_FAILED),
        (_, StoreOp::ListSpots | StoreOp::ReadSpot) => {
            ApiError::internal(messages::SPOT_SCAN_FAILED)
        }
        (_, StoreOp::UpdateSpot) => ApiError::internal(messages::INVALID_PARKING_SPOT),
        (_, StoreOp::Entry) => ApiError::internal(messages::ENTRY_FAILED),
        (_, StoreOp::Exit) => ApiError::internal(messages::EXIT_FAILED),
        (_, StoreOp::DeleteSpot) => ApiError::internal(messages::INTERNAL),
    };
    if mapped.http_status() >= 500 {
        error!(operation = op.as_str(), error = %err, "store operation failed");
    } else {
        warn!(operation = op.as_str(), error = %err, "store operation rejected");
    }
    mapped
}

pub(crate) fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"))
}

/// Plain-text message by default, `{"error": ...}` for JSON clients.
pub(crate) fn api_error_response(headers: &HeaderMap, err: &ApiError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if wants_json(headers) {
        (status, Json(json!({ "error": err }))).into_response()
    } else {
        (
            status,
            [(CONTENT_TYPE, "text/plain; charset=utf-8")],
            format!("{}\n", err.message),
        )
            .into_response()
    }
}
