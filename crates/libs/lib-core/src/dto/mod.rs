//! # Data Transfer Objects (DTOs)
//!
//! Request and response bodies of the REST API. Request DTOs own their
//! validation: a body that passes `validate` is ready for the storage layer.

pub mod students;
pub mod users;

pub use students::*;
pub use users::*;

use serde::{Deserialize, Serialize};

/// Plain acknowledgement body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
