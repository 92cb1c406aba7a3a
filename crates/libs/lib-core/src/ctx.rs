//! # Request Context
//!
//! The identity attached to a request once the auth middleware has accepted
//! its session token.
//!
//! Protected handlers take [`Ctx`] as an argument. The extractor only reads
//! request extensions; if no middleware put a `Ctx` there the request is
//! rejected as unauthorized.

use crate::error::AppError;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Authenticated identity of the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ctx {
    username: String,
}

impl Ctx {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Ctx {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Ctx>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}
