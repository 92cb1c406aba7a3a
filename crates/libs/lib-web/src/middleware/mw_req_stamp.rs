//! # Request Stamping Middleware
//!
//! Gives every request an ID and a receive time so log lines from one request
//! can be correlated. The ID is echoed back in the `X-Request-ID` header.
//!
//! Handlers that want it take `Extension<RequestStamp>`.

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};
use lib_utils::now_utc;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Request metadata for tracing and debugging.
#[derive(Clone, Debug)]
pub struct RequestStamp {
    pub id: Uuid,
    pub received_at: DateTime<Utc>,
}

impl RequestStamp {
    fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            received_at: now_utc(),
        }
    }
}

/// Stamp the request, run it, and copy the ID onto the response.
pub async fn stamp_req(mut req: Request, next: Next) -> Response {
    let stamp = RequestStamp::new();
    req.extensions_mut().insert(stamp.clone());

    let mut res = next.run(req).await;

    if let Ok(value) = HeaderValue::from_str(&stamp.id.to_string()) {
        res.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    res
}
