// SPDX-License-Identifier: Apache-2.0

use crate::AppState;
use axum::http::{HeaderMap, HeaderName, HeaderValue};
use std::sync::atomic::Ordering;

pub(crate) const REQUEST_ID_HEADER: &str = "x-request-id";
pub(crate) const CORRELATION_ID_HEADER: &str = "x-correlation-id";

/// Inbound ids are echoed back as response headers, so only short printable
/// ASCII tokens are adopted.
const MAX_TRACE_ID_LEN: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RequestTrace {
    pub request_id: String,
    pub correlation_id: Option<String>,
}

impl RequestTrace {
    /// Stamps the trace ids onto an outgoing response.
    pub(crate) fn stamp(&self, headers: &mut HeaderMap) {
        let pairs = [
            (REQUEST_ID_HEADER, Some(self.request_id.as_str())),
            (CORRELATION_ID_HEADER, self.correlation_id.as_deref()),
        ];
        for (name, value) in pairs {
            if let Some(value) = value.and_then(|v| HeaderValue::from_str(v).ok()) {
                headers.insert(HeaderName::from_static(name), value);
            }
        }
    }
}

fn accepted_id(headers: &HeaderMap, name: &str) -> Option<String> {
    let raw = headers.get(name)?.to_str().ok()?.trim();
    let usable = !raw.is_empty()
        && raw.len() <= MAX_TRACE_ID_LEN
        && raw.bytes().all(|b| b.is_ascii_graphic());
    usable.then(|| raw.to_string())
}

#[must_use]
pub(crate) fn extract_request_trace(headers: &HeaderMap, state: &AppState) -> RequestTrace {
    let request_id = accepted_id(headers, REQUEST_ID_HEADER).unwrap_or_else(|| {
        let seq = state.request_id_seed.fetch_add(1, Ordering::Relaxed);
        format!("req-{seq:016x}")
    });
    RequestTrace {
        request_id,
        correlation_id: accepted_id(headers, CORRELATION_ID_HEADER),
    }
}
