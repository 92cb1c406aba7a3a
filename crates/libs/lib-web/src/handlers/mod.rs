//! # HTTP Request Handlers
//!
//! Axum handlers organized by resource.
//!
//! ## Handler Modules
//!
//! - **[`users`]**: accounts and sessions
//!   - `POST /api/users/register` - Create an account
//!   - `POST /api/users/login` - Start a session (sets the `token` cookie)
//!   - `POST /api/users/logout` - End the session (clears the cookie)
//!   - `GET /api/user/me` - Who am I (protected)
//!
//! - **[`students`]**: student records
//!   - `POST /api/students` - Create (protected)
//!   - `GET /api/students` - List all
//!   - `GET /api/students/{id}` - Fetch one
//!   - `PUT /api/students/{id}` - Replace fields (protected)
//!   - `DELETE /api/students/{id}` - Delete (protected)
//!
//! ## Error Handling
//!
//! Handlers return `lib_core::Result<T>`. Every failure is an
//! [`AppError`](lib_core::AppError), which renders itself as
//! `{"error": ..., "code": ...}` with the matching status code.

pub mod students;
pub mod users;
