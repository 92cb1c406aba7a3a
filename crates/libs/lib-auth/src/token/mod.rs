//! # Session Tokens
//!
//! Issues and verifies HS256-signed session tokens.
//!
//! A token embeds the username and an absolute expiry. The server keeps no
//! session state: a token is valid iff its signature checks out against the
//! configured secret and the verification time is before its expiry.
//!
//! Time is always passed in by the caller, so the validity window is checked
//! against an explicit `now` instead of the system clock.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use lib_utils::{from_unix_secs, truncate_to_secs};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifetime of a session token.
pub const SESSION_TTL_HOURS: i64 = 24;

/// Claims carried inside a session token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Username of the authenticated user
    pub username: String,
    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,
    /// Issued at time (Unix timestamp, seconds)
    pub iat: i64,
}

/// A freshly signed token together with its absolute expiry.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Verification failures. There is no partially trusted state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("session token is malformed or its signature does not match")]
    Malformed,

    #[error("session token has expired")]
    Expired,

    #[error("failed to sign session token: {0}")]
    Signing(String),
}

/// Sign a token for `username`, valid for [`SESSION_TTL_HOURS`] from `now`.
///
/// `now` is truncated to whole seconds, the resolution of the `exp` claim.
pub fn issue_token(username: &str, now: DateTime<Utc>, secret: &str) -> Result<IssuedToken, AuthError> {
    let issued_at = truncate_to_secs(now);
    let expires_at = issued_at + Duration::hours(SESSION_TTL_HOURS);

    let claims = Claims {
        username: username.to_string(),
        exp: expires_at.timestamp(),
        iat: issued_at.timestamp(),
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AuthError::Signing(e.to_string()))?;

    Ok(IssuedToken { token, expires_at })
}

/// Verify a token at time `now` and return the embedded username.
pub fn verify_token(token: &str, now: DateTime<Utc>, secret: &str) -> Result<String, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    // Expiry is checked below against the caller's clock.
    validation.validate_exp = false;
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp"]);

    let claims = decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map_err(|_| AuthError::Malformed)?
        .claims;

    let expires_at = from_unix_secs(claims.exp).map_err(|_| AuthError::Malformed)?;
    if now >= expires_at {
        return Err(AuthError::Expired);
    }

    Ok(claims.username)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SECRET: &str = "test-secret-key-must-be-at-least-32-chars-long!";

    fn issue_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 8, 30, 0).unwrap()
    }

    #[test]
    fn test_issue_and_verify() {
        let now = issue_time();
        let issued = issue_token("bob", now, SECRET).expect("token signing should succeed");

        assert_eq!(issued.expires_at, now + Duration::hours(24));
        assert_eq!(verify_token(&issued.token, now, SECRET), Ok("bob".to_string()));
    }

    #[test]
    fn test_validity_window() {
        let t = issue_time();
        let issued = issue_token("bob", t, SECRET).expect("token signing should succeed");
        let ttl = Duration::hours(SESSION_TTL_HOURS);

        for offset in [
            Duration::zero(),
            Duration::seconds(1),
            Duration::hours(12),
            ttl - Duration::seconds(1),
            ttl - Duration::milliseconds(1),
        ] {
            assert_eq!(
                verify_token(&issued.token, t + offset, SECRET),
                Ok("bob".to_string()),
                "token should be valid at T + {offset}"
            );
        }

        for offset in [ttl, ttl + Duration::milliseconds(1), ttl + Duration::days(30)] {
            assert_eq!(
                verify_token(&issued.token, t + offset, SECRET),
                Err(AuthError::Expired),
                "token should be expired at T + {offset}"
            );
        }
    }

    #[test]
    fn test_fractional_issue_time_is_truncated() {
        let t = issue_time() + Duration::milliseconds(600);
        let issued = issue_token("bob", t, SECRET).expect("token signing should succeed");

        assert_eq!(issued.expires_at, issue_time() + Duration::hours(24));
        assert_eq!(
            verify_token(&issued.token, issued.expires_at, SECRET),
            Err(AuthError::Expired)
        );
    }

    #[test]
    fn test_wrong_secret_is_malformed() {
        let now = issue_time();
        let issued = issue_token("bob", now, SECRET).expect("token signing should succeed");

        assert_eq!(
            verify_token(&issued.token, now, "another-secret-key-of-at-least-32-chars!"),
            Err(AuthError::Malformed)
        );
    }

    #[test]
    fn test_garbage_is_malformed() {
        let now = issue_time();

        assert_eq!(verify_token("", now, SECRET), Err(AuthError::Malformed));
        assert_eq!(verify_token("not.a.token", now, SECRET), Err(AuthError::Malformed));
    }

    #[test]
    fn test_tampered_payload_is_malformed() {
        let now = issue_time();
        let issued = issue_token("bob", now, SECRET).expect("token signing should succeed");
        let forged = issue_token("mallory", now, SECRET).expect("token signing should succeed");

        // Splice mallory's claims onto bob's signature.
        let bob_parts: Vec<&str> = issued.token.split('.').collect();
        let mallory_parts: Vec<&str> = forged.token.split('.').collect();
        let spliced = format!("{}.{}.{}", bob_parts[0], mallory_parts[1], bob_parts[2]);

        assert_eq!(verify_token(&spliced, now, SECRET), Err(AuthError::Malformed));
    }
}
