// SPDX-License-Identifier: Apache-2.0

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Response;
use parkwise_api::{decode_body, messages, ApiError, DeleteConfirmation, SpotBody};
use parkwise_model::{NewParkingSpot, SpotId};

use super::errors::StoreOp;
use super::{respond, with_store};
use crate::AppState;

fn spot_body(body: &[u8]) -> Result<NewParkingSpot, ApiError> {
    decode_body::<SpotBody>(body, messages::INVALID_BODY)?.into_new_spot()
}

// No spot can carry a non-integer id.
fn path_id(raw: &str) -> Result<SpotId, ApiError> {
    SpotId::parse(raw).map_err(|_| ApiError::not_found(messages::SPOT_NOT_FOUND))
}

pub(crate) async fn create_spot_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let result = async {
        let spot = spot_body(&body)?;
        with_store(&state, StoreOp::CreateSpot, move |s| s.create_spot(spot)).await
    }
    .await;
    respond(&headers, result)
}

pub(crate) async fn list_spots_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    let result = with_store(&state, StoreOp::ListSpots, |s| s.list_spots()).await;
    respond(&headers, result)
}

pub(crate) async fn get_spot_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let result = async {
        let id = path_id(&id)?;
        with_store(&state, StoreOp::ReadSpot, move |s| s.get_spot(id)).await
    }
    .await;
    respond(&headers, result)
}

pub(crate) async fn update_spot_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let result = async {
        let spot = spot_body(&body)?;
        let id = path_id(&id)?;
        with_store(&state, StoreOp::UpdateSpot, move |s| s.update_spot(id, spot)).await
    }
    .await;
    respond(&headers, result)
}

pub(crate) async fn delete_spot_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let result = async {
        let id = path_id(&id)?;
        with_store(&state, StoreOp::DeleteSpot, move |s| s.delete_spot(id)).await?;
        tracing::info!(spot_id = %id, "parking spot deleted");
        Ok::<_, ApiError>(DeleteConfirmation::default())
    }
    .await;
    respond(&headers, result)
}
