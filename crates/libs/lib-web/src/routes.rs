//! # Routes
//!
//! Route table and the middleware stack around it.
//!
//! | Method | Path                   | Auth      |
//! |--------|------------------------|-----------|
//! | POST   | `/api/users/register`  | public    |
//! | POST   | `/api/users/login`     | public    |
//! | POST   | `/api/users/logout`    | public    |
//! | GET    | `/api/user/me`         | session   |
//! | POST   | `/api/students`        | session   |
//! | GET    | `/api/students`        | public    |
//! | GET    | `/api/students/{id}`   | public    |
//! | PUT    | `/api/students/{id}`   | session   |
//! | DELETE | `/api/students/{id}`   | session   |
//! | GET    | `/health`              | public    |

use crate::handlers::{students, users};
use crate::middleware::{log_requests, require_auth, stamp_req, RequestStamp};
use crate::server::AppState;
use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Create the application router.
///
/// Origins that do not parse as header values are skipped with a warning.
pub fn create_router(state: AppState, allowed_origins: &[String]) -> Router {
    // Layered per method router so an unsupported method still gets 405.
    let auth = from_fn_with_state(state.clone(), require_auth);

    let routes = Router::new()
        .route("/api/users/register", post(users::register))
        .route("/api/users/login", post(users::login))
        .route("/api/users/logout", post(users::logout))
        .route("/api/user/me", get(users::me).route_layer(auth.clone()))
        .route(
            "/api/students",
            get(students::list).merge(post(students::create).route_layer(auth.clone())),
        )
        .route(
            "/api/students/{id}",
            get(students::get).merge(put(students::update).delete(students::delete).route_layer(auth)),
        )
        .route("/health", get(|| async { "OK" }));

    routes
        .fallback(|| async { (StatusCode::NOT_FOUND, "Route not found") })
        .with_state(state)
        .layer(from_fn(log_requests))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .extensions()
                    .get::<RequestStamp>()
                    .map(|s| s.id.to_string())
                    .unwrap_or_else(|| "unknown".to_string());
                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        // Outermost so the trace span and the logs both see the stamp
        .layer(from_fn(stamp_req))
        .layer(cors_layer(allowed_origins))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("[CORS] Ignoring invalid origin: {}", origin);
                None
            }
        })
        .collect();

    info!("[CORS] Allowed origins: {:?}", origins);

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}
