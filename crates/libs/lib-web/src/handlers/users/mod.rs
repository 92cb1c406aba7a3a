//! # User Handlers
//!
//! Registration, login/logout and the current-user endpoint.
//!
//! Login hands out the session token twice: as an HttpOnly `token` cookie,
//! which is what the auth middleware reads, and in the JSON body for
//! clients that want to inspect it.

use crate::middleware::SESSION_COOKIE;
use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use chrono::{DateTime, Utc};
use lib_auth::{hash_password, issue_token, verify_stored_password};
use lib_core::dto::{Credentials, LoginResponse, MessageResponse, RegisterResponse, UserInfo};
use lib_core::{AppError, Config, Ctx, DynStore, Result};
use lib_utils::now_utc;
use time::OffsetDateTime;
use tracing::{debug, info, instrument, warn};

/// Register handler - creates a new user account.
///
/// # Returns
///
/// * `201 Created` with `{id, message}`
/// * `400` - Missing username or password, or a password the hasher refuses
/// * `409` - Username already taken
#[instrument(skip_all, fields(username = %req.username))]
pub async fn register(
    State(store): State<DynStore>,
    Json(req): Json<Credentials>,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    req.validate()?;

    let Credentials { username, password } = req;

    debug!("[REGISTER] Hashing password...");
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::Internal(format!("hashing task failed: {e}")))?
        .map_err(|e| AppError::Hashing(e.to_string()))?;

    let id = store.register_user(&username, &password_hash).await?;

    info!("[REGISTER] User created: {} (id: {})", username, id);

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id,
            message: "User registered successfully".to_string(),
        }),
    ))
}

/// Login handler - verifies credentials and starts a session.
///
/// An unknown username and a wrong password produce the same
/// `401 InvalidCredentials` response.
#[instrument(skip_all, fields(username = %req.username))]
pub async fn login(
    State(store): State<DynStore>,
    State(config): State<Config>,
    jar: CookieJar,
    Json(req): Json<Credentials>,
) -> Result<(CookieJar, Json<LoginResponse>)> {
    req.validate()?;

    let user = match store.get_user_by_username(&req.username).await {
        Ok(user) => Some(user),
        Err(AppError::NotFound(_)) => None,
        Err(e) => return Err(e),
    };

    // Unknown usernames still pay for a full verification.
    let password = req.password;
    let digest = user.as_ref().map(|u| u.password.clone());
    let valid = tokio::task::spawn_blocking(move || verify_stored_password(&password, digest.as_deref()))
        .await
        .map_err(|e| AppError::Internal(format!("verification task failed: {e}")))?;

    let Some(user) = user.filter(|_| valid) else {
        warn!("[LOGIN] Invalid credentials");
        return Err(AppError::InvalidCredentials);
    };

    let issued = issue_token(&user.username, now_utc(), &config.jwt_secret)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let cookie = Cookie::build((SESSION_COOKIE, issued.token.clone()))
        .path("/")
        .http_only(true)
        .expires(to_offset_date_time(issued.expires_at)?);

    info!("[LOGIN] Session started for {} until {}", user.username, issued.expires_at);

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            message: "Login successful".to_string(),
            token: issued.token,
        }),
    ))
}

/// Logout handler - overwrites the session cookie with an empty, already
/// expired one. The token itself stays valid until it expires.
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<MessageResponse>) {
    let cookie = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .expires(OffsetDateTime::UNIX_EPOCH);

    (jar.add(cookie), Json(MessageResponse::new("Logged out successfully")))
}

/// Current user handler.
pub async fn me(State(store): State<DynStore>, ctx: Ctx) -> Result<Json<UserInfo>> {
    let user = store.get_user_by_username(ctx.username()).await?;
    Ok(Json(UserInfo::from(user)))
}

fn to_offset_date_time(at: DateTime<Utc>) -> Result<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp(at.timestamp())
        .map_err(|e| AppError::Internal(format!("cookie expiry out of range: {e}")))
}
