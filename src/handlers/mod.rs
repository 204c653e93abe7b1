//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, query string, auth context)
//! 2. Delegates to a service
//! 3. Returns HTTP response (JSON, status code)

/// Registration and login
pub mod auth;
/// Liveness and demo endpoints
pub mod health;
/// Balance, transfer and history
pub mod points;
/// Profile and user search
pub mod users;
