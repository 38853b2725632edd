// SPDX-License-Identifier: Apache-2.0

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Response;
use parkwise_api::{decode_body, messages, ApiError, VehicleMovementBody, VehicleRecordView};
use parkwise_model::SpotNumber;

use super::errors::StoreOp;
use super::{respond, with_store};
use crate::AppState;

pub(crate) async fn vehicle_entry_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let result = async {
        let movement: VehicleMovementBody = decode_body(&body, messages::INVALID_INPUT)?;
        let (spot, plate) = movement.parse()?;
        let record = with_store(&state, StoreOp::Entry, move |s| s.enter(&spot, &plate)).await?;
        Ok::<_, ApiError>(VehicleRecordView::from(&record))
    }
    .await;
    respond(&headers, result)
}

pub(crate) async fn vehicle_exit_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let result = async {
        let movement: VehicleMovementBody = decode_body(&body, messages::INVALID_INPUT)?;
        let (spot, plate) = movement.parse()?;
        let record = with_store(&state, StoreOp::Exit, move |s| s.exit(&spot, &plate)).await?;
        Ok::<_, ApiError>(VehicleRecordView::from(&record))
    }
    .await;
    respond(&headers, result)
}

/// Zero or one record for the spot; see `ParkingStore::records_for_spot`.
pub(crate) async fn vehicle_lookup_handler(
    State(state): State<AppState>,
    Path(spot_number): Path<String>,
    headers: HeaderMap,
) -> Response {
    let result = async {
        let spot = SpotNumber::parse(&spot_number)
            .map_err(|_| ApiError::not_found(messages::SPOT_NOT_FOUND))?;
        let records = with_store(&state, StoreOp::Lookup, move |s| s.records_for_spot(&spot)).await?;
        Ok::<_, ApiError>(
            records
                .iter()
                .map(VehicleRecordView::from)
                .collect::<Vec<_>>(),
        )
    }
    .await;
    respond(&headers, result)
}
