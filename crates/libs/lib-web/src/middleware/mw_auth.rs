//! # Authentication Middleware
//!
//! Session gate for protected routes.
//!
//! The session token travels in the `token` cookie set by the login handler.
//! [`require_auth`] verifies it and injects a [`Ctx`] into the request
//! extensions. Handlers then take `Ctx` as an argument.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use axum::{middleware::from_fn_with_state, routing::get, Router};
//! use lib_web::middleware::require_auth;
//!
//! let protected = Router::new()
//!     .route("/api/user/me", get(me))
//!     .route_layer(from_fn_with_state(state.clone(), require_auth));
//! ```

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use chrono::{DateTime, Utc};
use lib_auth::{verify_token, AuthError};
use lib_core::{AppError, Config, Ctx};
use lib_utils::now_utc;
use thiserror::Error;
use tracing::{debug, warn};

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "token";

/// Why a request was refused. Only ever logged; the client sees a bare 401.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthFailure {
    #[error("no session cookie")]
    MissingToken,

    #[error(transparent)]
    Invalid(#[from] AuthError),
}

impl From<AuthFailure> for AppError {
    fn from(_: AuthFailure) -> Self {
        AppError::Unauthorized
    }
}

/// Decide whether a request carrying `token` may proceed at `now`.
///
/// An empty cookie value counts as missing, which is what a logged out
/// client sends back.
pub fn authenticate(token: Option<&str>, now: DateTime<Utc>, secret: &str) -> Result<Ctx, AuthFailure> {
    let token = token.filter(|t| !t.is_empty()).ok_or(AuthFailure::MissingToken)?;
    let username = verify_token(token, now, secret)?;

    Ok(Ctx::new(username))
}

/// Authentication middleware for protected routes.
///
/// # Behavior
///
/// - **Valid session**: continues with `Ctx` in the request extensions
/// - **Missing/invalid/expired session**: `401 Unauthorized`, handler never runs
pub async fn require_auth(
    State(config): State<Config>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = jar.get(SESSION_COOKIE).map(|c| c.value());

    let ctx = authenticate(token, now_utc(), &config.jwt_secret).map_err(|e| {
        warn!("[AUTH] {} {} rejected: {}", req.method(), req.uri().path(), e);
        AppError::from(e)
    })?;

    debug!("[AUTH] Authenticated user: {}", ctx.username());

    req.extensions_mut().insert(ctx);

    Ok(next.run(req).await)
}
