//! Shared fixtures for handler and router tests.

use crate::middleware::SESSION_COOKIE;
use crate::routes::create_router;
use crate::server::AppState;
use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use lib_auth::issue_token;
use lib_core::{Config, SqliteStore};
use lib_utils::now_utc;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-key-must-be-at-least-32-characters-long!";

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: TEST_SECRET.to_string(),
        app_env: "test".to_string(),
    }
}

/// Fresh in-memory database behind the full router.
pub async fn test_app() -> Router {
    let store = SqliteStore::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database")
        .into_dyn();

    create_router(
        AppState {
            store,
            config: test_config(),
        },
        &[],
    )
}

/// `Cookie` header value holding a valid session for `username`.
pub fn session_cookie(username: &str) -> String {
    let issued = issue_token(username, now_utc(), TEST_SECRET).expect("token should sign");
    format!("{SESSION_COOKIE}={}", issued.token)
}

pub fn request(method: Method, uri: &str, body: Option<Value>, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn send(app: &Router, req: Request<Body>) -> Response<Body> {
    app.clone().oneshot(req).await.unwrap()
}

pub async fn body_json<T: DeserializeOwned>(res: Response<Body>) -> T {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// The `Set-Cookie` header of a response, if any.
pub fn set_cookie(res: &Response<Body>) -> Option<String> {
    res.headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
