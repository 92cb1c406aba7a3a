//! # Core Library
//!
//! Configuration, errors, request context, DTOs and the storage layer.

pub mod config;
pub mod ctx;
pub mod dto;
pub mod error;
pub mod model;

// Re-export commonly used types
pub use config::Config;
pub use ctx::Ctx;
pub use error::{AppError, Result};
pub use model::store::{create_pool, DbPool, DynStore, SqliteStore, Storage};
