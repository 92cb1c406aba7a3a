//! # User DTOs
//!
//! ```text
//! POST /api/users/register  {"username":"bob","password":"secret"} -> 201 {"id":1,"message":"..."}
//! POST /api/users/login     {"username":"bob","password":"secret"} -> 200 {"message":"...","token":"..."}
//! GET  /api/user/me                                                 -> 200 {"id":1,"username":"bob"}
//! ```

use crate::error::{AppError, Result};
use crate::model::store::models::User;
use lib_utils::validate_not_empty;
use serde::{Deserialize, Serialize};

/// Username and plaintext password, used by both register and login.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn validate(&self) -> Result<()> {
        validate_not_empty(&self.username, "username").map_err(AppError::Validation)?;
        // Passwords are not trimmed; only a fully empty one is missing.
        if self.password.is_empty() {
            return Err(AppError::Validation("field password is required".to_string()));
        }
        Ok(())
    }
}

// Keep plaintext passwords out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterResponse {
    pub id: i64,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}

/// Public view of a user. Never carries the password digest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}
