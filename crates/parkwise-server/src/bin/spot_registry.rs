// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

use parkwise_server::{init_tracing, serve, Service, ServiceConfig};

#[tokio::main]
async fn main() -> Result<(), String> {
    let cfg = ServiceConfig::from_env();
    init_tracing(cfg.log_json);
    serve(Service::SpotRegistry, cfg).await
}
