//! # Application Configuration
//!
//! This module loads the process-wide configuration from environment
//! variables. It is read once at startup, validated to fail fast if
//! misconfigured, and then handed to the web layer as part of the application
//! state. Nothing reads it through a global.
//!
//! | Variable       | Default                    | Notes                       |
//! |----------------|----------------------------|-----------------------------|
//! | `DATABASE_URL` | `sqlite:storage/storage.db`| SQLite connection URL       |
//! | `JWT_SECRET`   | (required)                 | at least 32 characters      |
//! | `APP_ENV`      | `dev`                      | informational, logged       |

use crate::error::{AppError, Result};
use lib_utils::{get_env, get_env_or};

/// Default SQLite database location.
pub const DEFAULT_DATABASE_URL: &str = "sqlite:storage/storage.db";

/// Shortest accepted session signing secret.
pub const MIN_SECRET_LEN: usize = 32;

/// Application configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    /// SQLite database connection URL
    pub database_url: String,

    /// Secret key for session token signing and verification
    ///
    /// **Must be at least 32 characters long.** Never rotated at runtime.
    pub jwt_secret: String,

    /// Deployment environment name (e.g. `dev`, `production`)
    pub app_env: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let database_url = get_env_or("DATABASE_URL", DEFAULT_DATABASE_URL);

        let jwt_secret = get_env("JWT_SECRET").map_err(|e| AppError::Config(e.to_string()))?;

        let app_env = get_env_or("APP_ENV", "dev");

        Ok(Self {
            database_url,
            jwt_secret,
            app_env,
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.jwt_secret.len() < MIN_SECRET_LEN {
            return Err(AppError::Config(format!(
                "JWT_SECRET must be at least {MIN_SECRET_LEN} characters long"
            )));
        }

        if !self.database_url.starts_with("sqlite:") {
            return Err(AppError::Config(
                "DATABASE_URL must be a sqlite: connection URL".to_string(),
            ));
        }

        Ok(())
    }

    /// Load and validate in one step.
    pub fn load() -> Result<Self> {
        let config = Self::from_env()?;
        config.validate()?;
        Ok(config)
    }
}

// The secret must never end up in logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &self.database_url)
            .field("jwt_secret", &"***REDACTED***")
            .field("app_env", &self.app_env)
            .finish()
    }
}
