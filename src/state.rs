//! Shared application state handed to every handler and middleware.

use std::sync::Arc;

use crate::{config::Config, db::DbPool, services::token_service::TokenKeys};

/// Built once at startup and cloned into each request via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub tokens: Arc<TokenKeys>,
}

impl AppState {
    pub fn new(pool: DbPool, tokens: TokenKeys) -> Self {
        Self {
            pool,
            tokens: Arc::new(tokens),
        }
    }

    pub fn from_config(pool: DbPool, config: &Config) -> Self {
        Self::new(pool, TokenKeys::new(&config.jwt_secret, config.token_ttl()))
    }
}
