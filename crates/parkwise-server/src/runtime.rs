// SPDX-License-Identifier: Apache-2.0

use parkwise_store::{ParkingStore, StoreOptions, SystemClock};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::{build_router, AppState, Service, ServiceConfig};

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
                return;
            }
            _ => warn!("unix signal handlers unavailable; falling back to ctrl-c"),
        }
    }
    let _ = tokio::signal::ctrl_c().await;
}

/// Opens the shared store, binds the service's address and serves until
/// SIGINT/SIGTERM.
pub async fn serve(service: Service, cfg: ServiceConfig) -> Result<(), String> {
    let addr = cfg.bind_addr(service)?;
    let options = StoreOptions {
        busy_timeout: cfg.busy_timeout,
    };
    let db_path = cfg.db_path.clone();
    let store = tokio::task::spawn_blocking(move || {
        ParkingStore::open(&db_path, &options, Arc::new(SystemClock))
    })
    .await
    .map_err(|e| format!("store open task failed: {e}"))?
    .map_err(|e| format!("open store {} failed: {e}", cfg.db_path.display()))?;

    let state = AppState::with_config(Arc::new(store), &cfg);
    let app = build_router(service, state);

    let socket = if addr.is_ipv4() {
        tokio::net::TcpSocket::new_v4().map_err(|e| format!("socket v4 failed: {e}"))?
    } else {
        tokio::net::TcpSocket::new_v6().map_err(|e| format!("socket v6 failed: {e}"))?
    };
    socket
        .set_reuseaddr(true)
        .map_err(|e| format!("set_reuseaddr failed: {e}"))?;
    socket.bind(addr).map_err(|e| format!("bind failed: {e}"))?;
    let listener: TcpListener = socket
        .listen(1024)
        .map_err(|e| format!("listen failed: {e}"))?;
    info!(
        service = service.name(),
        db_path = %cfg.db_path.display(),
        "{} listening on {addr}",
        service.name()
    );

    let drain = cfg.shutdown_drain;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            wait_for_shutdown_signal().await;
            info!(service = service.name(), "shutdown requested; draining");
            tokio::time::sleep(drain).await;
        })
        .await
        .map_err(|e| format!("server failed: {e}"))
}
