// SPDX-License-Identifier: Apache-2.0

pub(crate) mod errors;
pub(crate) mod occupancy;
pub(crate) mod request_tracing;
pub(crate) mod spots;

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use parkwise_api::ApiError;
use parkwise_store::{ParkingStore, StoreError};
use serde::Serialize;

use crate::AppState;
use errors::{api_error_response, StoreOp};

pub(crate) async fn healthz_handler() -> impl IntoResponse {
    (StatusCode::OK, [(CONTENT_TYPE, "text/plain; charset=utf-8")], "ok")
}

/// Runs a store call off the async runtime and maps its failure for `op`.
pub(crate) async fn with_store<T, F>(state: &AppState, op: StoreOp, f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&ParkingStore) -> Result<T, StoreError> + Send + 'static,
{
    let store = state.store.clone();
    match tokio::task::spawn_blocking(move || f(&store)).await {
        Ok(result) => result.map_err(|e| errors::map_store_error(op, e)),
        Err(join) => {
            tracing::error!(operation = op.as_str(), error = %join, "store task failed");
            Err(ApiError::internal(parkwise_api::messages::INTERNAL))
        }
    }
}

pub(crate) fn respond<T: Serialize>(headers: &HeaderMap, result: Result<T, ApiError>) -> Response {
    match result {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(err) => api_error_response(headers, &err),
    }
}
