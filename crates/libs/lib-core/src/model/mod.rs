//! # Model
//!
//! Entities and their persistence.

pub mod store;
