//! # Centralized Error Handling
//!
//! This module defines the application-wide error type [`AppError`] used by the
//! storage layer, the auth middleware and every handler.
//!
//! ## Error Categories
//!
//! 1. **Client Errors** (4xx)
//!    - [`Validation`](AppError::Validation) → 400 Bad Request
//!    - [`Hashing`](AppError::Hashing) → 400 Bad Request
//!    - [`Unauthorized`](AppError::Unauthorized) → 401 Unauthorized
//!    - [`InvalidCredentials`](AppError::InvalidCredentials) → 401 Unauthorized
//!    - [`NotFound`](AppError::NotFound) → 404 Not Found
//!    - [`DuplicateUsername`](AppError::DuplicateUsername) → 409 Conflict
//!
//! 2. **Server Errors** (5xx)
//!    - [`Storage`](AppError::Storage) → 500 Internal Server Error
//!    - [`Config`](AppError::Config) → 500 Internal Server Error
//!    - [`Internal`](AppError::Internal) → 500 Internal Server Error
//!
//! Server errors are logged in full and reach the client only as a generic
//! message, so backend error text never leaks over the wire.
//!
//! ## Error Conversion
//!
//! - `From<sqlx::Error>`: `RowNotFound` becomes `NotFound`, everything else `Storage`
//! - `From<sqlx::migrate::MigrateError>` → `Storage`

use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde_json::json;
use thiserror::Error;

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or missing input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Missing, malformed or expired session.
    #[error("Unauthorized")]
    Unauthorized,

    /// Login failed. Deliberately says nothing about which part was wrong.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Requested entity does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Username uniqueness violation on registration.
    #[error("Username already taken")]
    DuplicateUsername,

    /// Backend or connection failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Password rejected by the hasher.
    #[error("Hashing error: {0}")]
    Hashing(String),

    /// Configuration error during startup.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unexpected failure that fits no other category.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Hashing(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DuplicateUsername => StatusCode::CONFLICT,
            AppError::Storage(_) | AppError::Config(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to show the client.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) | AppError::NotFound(msg) => msg.clone(),
            AppError::Unauthorized => "Unauthorized".to_string(),
            AppError::InvalidCredentials => "Invalid username or password".to_string(),
            AppError::DuplicateUsername => "Username already taken".to_string(),
            AppError::Hashing(_) => "Password could not be processed".to_string(),
            AppError::Storage(_) | AppError::Config(_) | AppError::Internal(_) => {
                "An internal error occurred".to_string()
            }
        }
    }

    /// Stable machine-readable code for the response body.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "Validation",
            AppError::Unauthorized => "Unauthorized",
            AppError::InvalidCredentials => "InvalidCredentials",
            AppError::NotFound(_) => "NotFound",
            AppError::DuplicateUsername => "DuplicateUsername",
            AppError::Storage(_) => "Storage",
            AppError::Hashing(_) => "Hashing",
            AppError::Config(_) => "Config",
            AppError::Internal(_) => "Internal",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("Server error: {}", self);
        } else {
            tracing::debug!("Client error: {}", self);
        }

        let body = Json(json!({
            "error": self.user_message(),
            "code": self.code(),
        }));

        (status, body).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Database record not found".to_string()),
            sqlx::Error::Database(db_err) => AppError::Storage(db_err.message().to_string()),
            _ => AppError::Storage(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        AppError::Storage(format!("Migration failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::Validation("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::DuplicateUsername.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::Storage("disk I/O error".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_server_errors_are_not_leaked() {
        let err = AppError::Storage("no such table: students".into());
        assert_eq!(err.user_message(), "An internal error occurred");
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        assert!(matches!(AppError::from(sqlx::Error::RowNotFound), AppError::NotFound(_)));
        assert!(matches!(AppError::from(sqlx::Error::PoolClosed), AppError::Storage(_)));
    }
}
