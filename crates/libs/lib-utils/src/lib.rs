//! # Utilities Library
//!
//! Shared helpers for environment variables, time, and input validation.

pub mod envs;
pub mod time;
pub mod validation;

// Re-export commonly used functions
pub use envs::{get_env, get_env_or, get_env_parse_or};
pub use time::{from_unix_secs, now_utc, truncate_to_secs};
pub use validation::{validate_non_zero, validate_not_empty};
