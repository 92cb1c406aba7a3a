//! # Web Library
//!
//! HTTP handlers, middleware, routes, and server lifecycle.

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;

#[cfg(test)]
mod test_utils;

pub use routes::create_router;
pub use server::{start_server, AppState, ServerConfig};
