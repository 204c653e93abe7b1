//! Points Ledger Server
//!
//! REST API for user accounts holding point balances. Users register, log
//! in with a bearer token, and transfer points to each other by public code.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: SQLite with sqlx (async queries, WAL journal)
//! - **Authentication**: HS256 JWT bearer tokens, Argon2 password hashes
//! - **Format**: JSON requests/responses

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// Build the HTTP router with all routes and middleware.
pub fn router(state: AppState) -> Router {
    // Routes that require a valid bearer token
    let authenticated_routes = Router::new()
        .route("/me", get(handlers::users::get_me))
        .route("/users/search", get(handlers::users::search_user))
        .route("/points/balance", get(handlers::points::get_balance))
        .route("/points/transfer", post(handlers::points::transfer_points))
        .route("/points/history", get(handlers::points::get_history))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::auth_middleware,
        ));

    Router::new()
        // Public routes (no authentication required)
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/health", get(handlers::health::health_check))
        .route("/api/hello", get(handlers::health::hello))
        .merge(authenticated_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
