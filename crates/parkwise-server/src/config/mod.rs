// SPDX-License-Identifier: Apache-2.0

use serde::Serialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Service {
    SpotRegistry,
    OccupancyTracker,
}

impl Service {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SpotRegistry => "spot-registry",
            Self::OccupancyTracker => "occupancy-tracker",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceConfig {
    pub db_path: PathBuf,
    pub spots_bind: String,
    pub occupancy_bind: String,
    pub max_body_bytes: usize,
    pub busy_timeout: Duration,
    pub log_json: bool,
    pub shutdown_drain: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("artifacts/parking.sqlite"),
            spots_bind: "0.0.0.0:8080".to_string(),
            occupancy_bind: "0.0.0.0:8081".to_string(),
            max_body_bytes: 16 * 1024,
            busy_timeout: Duration::from_millis(5000),
            log_json: true,
            shutdown_drain: Duration::from_millis(500),
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim() {
        "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
        "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
        _ => None,
    }
}

impl ServiceConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Unparseable values fall back to the default for that field.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let text = |name: &str, default: String| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
        };
        let number = |name: &str, default: u64| {
            lookup(name)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .unwrap_or(default)
        };
        let flag = |name: &str, default: bool| {
            lookup(name).as_deref().and_then(parse_bool).unwrap_or(default)
        };

        Self {
            db_path: PathBuf::from(text(
                "PARKWISE_DB_PATH",
                defaults.db_path.display().to_string(),
            )),
            spots_bind: text("PARKWISE_SPOTS_BIND", defaults.spots_bind),
            occupancy_bind: text("PARKWISE_OCCUPANCY_BIND", defaults.occupancy_bind),
            max_body_bytes: number("PARKWISE_MAX_BODY_BYTES", defaults.max_body_bytes as u64)
                as usize,
            busy_timeout: Duration::from_millis(number(
                "PARKWISE_BUSY_TIMEOUT_MS",
                defaults.busy_timeout.as_millis() as u64,
            )),
            log_json: flag("PARKWISE_LOG_JSON", defaults.log_json),
            shutdown_drain: Duration::from_millis(number(
                "PARKWISE_SHUTDOWN_DRAIN_MS",
                defaults.shutdown_drain.as_millis() as u64,
            )),
        }
    }

    pub fn bind_addr(&self, service: Service) -> Result<SocketAddr, String> {
        let raw = match service {
            Service::SpotRegistry => &self.spots_bind,
            Service::OccupancyTracker => &self.occupancy_bind,
        };
        raw.parse()
            .map_err(|e| format!("invalid bind addr {raw} for {}: {e}", service.name()))
    }
}
