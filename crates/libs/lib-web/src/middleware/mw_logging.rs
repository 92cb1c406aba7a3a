//! # Request/Response Logging Middleware
//!
//! One structured line per request and one per response, tagged with the
//! request ID from [`RequestStamp`](super::mw_req_stamp::RequestStamp).
//!
//! Credential headers are redacted. Request bodies are never logged; for the
//! user endpoints they carry plaintext passwords.

use super::mw_req_stamp::RequestStamp;
use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Headers whose values are replaced before logging.
const SENSITIVE_HEADERS: &[&str] = &["authorization", "cookie", "set-cookie"];

/// Log a request and its response.
pub async fn log_requests(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let stamp = req.extensions().get::<RequestStamp>().cloned();
    let request_id = stamp
        .as_ref()
        .map(|s| s.id.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let received_at = stamp.map(|s| s.received_at.to_rfc3339());

    let headers: Vec<(String, String)> = req
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            if SENSITIVE_HEADERS.contains(&name.as_str()) {
                Some((name.to_string(), "***REDACTED***".to_string()))
            } else {
                value.to_str().ok().map(|v| (name.to_string(), v.to_string()))
            }
        })
        .collect();

    info!(
        request_id = %request_id,
        received_at = ?received_at,
        method = %method,
        path = %path,
        "[REQUEST] {} {}",
        method, path
    );
    debug!(request_id = %request_id, headers = ?headers, "[REQUEST HEADERS]");

    let response = next.run(req).await;

    let duration_ms = start.elapsed().as_millis();
    let status = response.status();

    if status.is_server_error() {
        error!(
            request_id = %request_id,
            status = status.as_u16(),
            duration_ms,
            "[RESPONSE] {} {} -> {} ({}ms) [SERVER ERROR]",
            method, path, status.as_u16(), duration_ms
        );
    } else if status.is_client_error() {
        warn!(
            request_id = %request_id,
            status = status.as_u16(),
            duration_ms,
            "[RESPONSE] {} {} -> {} ({}ms) [CLIENT ERROR]",
            method, path, status.as_u16(), duration_ms
        );
    } else {
        info!(
            request_id = %request_id,
            status = status.as_u16(),
            duration_ms,
            "[RESPONSE] {} {} -> {} ({}ms)",
            method, path, status.as_u16(), duration_ms
        );
    }

    response
}
