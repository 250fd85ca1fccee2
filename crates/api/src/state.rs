//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ApiConfig;
use crate::services::{RazorpayClient, TokenService};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; holds the database pool, the token
/// service, and the payment gateway client.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pool: PgPool,
    tokens: TokenService,
    gateway: RazorpayClient,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: &ApiConfig, pool: PgPool) -> Self {
        let tokens = TokenService::new(&config.token_secret);
        let gateway = RazorpayClient::new(&config.razorpay);

        Self {
            inner: Arc::new(AppStateInner {
                pool,
                tokens,
                gateway,
            }),
        }
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the token service.
    #[must_use]
    pub fn tokens(&self) -> &TokenService {
        &self.inner.tokens
    }

    /// Get a reference to the payment gateway client.
    #[must_use]
    pub fn gateway(&self) -> &RazorpayClient {
        &self.inner.gateway
    }
}
