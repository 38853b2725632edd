// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use parkwise_api::{
    ROUTE_PARKING_SPOTS, ROUTE_PARKING_SPOTS_ALL, ROUTE_VEHICLE_ENTRIES, ROUTE_VEHICLE_EXITS,
};
use parkwise_store::ParkingStore;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;

mod config;
mod http;
mod middleware;
mod runtime;
mod telemetry;

pub use config::{Service, ServiceConfig};
pub use runtime::serve;
pub use telemetry::init_tracing;

pub const CRATE_NAME: &str = "parkwise-server";

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ParkingStore>,
    pub max_body_bytes: usize,
    pub(crate) service: Service,
    pub(crate) request_id_seed: Arc<AtomicU64>,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<ParkingStore>) -> Self {
        Self::with_config(store, &ServiceConfig::default())
    }

    #[must_use]
    pub fn with_config(store: Arc<ParkingStore>, cfg: &ServiceConfig) -> Self {
        Self {
            store,
            max_body_bytes: cfg.max_body_bytes,
            service: Service::SpotRegistry,
            request_id_seed: Arc::new(AtomicU64::new(1)),
        }
    }

    fn serving(mut self, service: Service) -> Self {
        self.service = service;
        self
    }
}

/// Spot registry: CRUD over parking spot records.
pub fn build_spot_registry_router(state: AppState) -> Router {
    let state = state.serving(Service::SpotRegistry);
    Router::new()
        .route("/healthz", get(http::healthz_handler))
        .route(ROUTE_PARKING_SPOTS, post(http::spots::create_spot_handler))
        .route(ROUTE_PARKING_SPOTS_ALL, get(http::spots::list_spots_handler))
        .route(
            "/api/parking-spots/:id",
            get(http::spots::get_spot_handler)
                .put(http::spots::update_spot_handler)
                .delete(http::spots::delete_spot_handler),
        )
        .layer(from_fn_with_state(
            state.clone(),
            middleware::request_tracing::request_tracing_middleware,
        ))
        .layer(DefaultBodyLimit::max(state.max_body_bytes))
        .with_state(state)
}

/// Occupancy tracker: vehicle entry, exit and lookup by spot number.
pub fn build_occupancy_router(state: AppState) -> Router {
    let state = state.serving(Service::OccupancyTracker);
    Router::new()
        .route("/healthz", get(http::healthz_handler))
        .route(
            ROUTE_VEHICLE_ENTRIES,
            post(http::occupancy::vehicle_entry_handler),
        )
        .route(ROUTE_VEHICLE_EXITS, post(http::occupancy::vehicle_exit_handler))
        .route(
            "/api/vehicle-exits/:spot_number",
            get(http::occupancy::vehicle_lookup_handler),
        )
        .layer(from_fn_with_state(
            state.clone(),
            middleware::request_tracing::request_tracing_middleware,
        ))
        .layer(DefaultBodyLimit::max(state.max_body_bytes))
        .with_state(state)
}

#[must_use]
pub fn build_router(service: Service, state: AppState) -> Router {
    match service {
        Service::SpotRegistry => build_spot_registry_router(state),
        Service::OccupancyTracker => build_occupancy_router(state),
    }
}
