//! # Authentication Library
//!
//! Password hashing and signed session tokens.

pub mod pwd;
pub mod token;

// Re-export commonly used types
pub use pwd::{hash_password, verify_password, verify_stored_password};
pub use token::{issue_token, verify_token, AuthError, Claims, IssuedToken, SESSION_TTL_HOURS};
