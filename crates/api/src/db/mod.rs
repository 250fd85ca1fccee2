//! Database operations for the storefront `PostgreSQL`.
//!
//! # Tables
//!
//! - `users` - Accounts with argon2 password hashes
//! - `products` / `product_sizes` / `product_colors` / `product_images` - Catalog
//! - `wishlist_items` - (user, product) set membership
//! - `orders` / `order_items` - Orders with denormalized line snapshots
//! - `abandonment_surveys` - Fire-and-forget checkout analytics
//!
//! All queries are runtime-checked (`sqlx::query_as::<_, Row>`); each
//! repository converts its private row types into domain models via `From`.
//!
//! # Migrations
//!
//! Migrations live in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p vastra-cli -- migrate
//! ```

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

pub mod orders;
pub mod products;
pub mod surveys;
pub mod users;
pub mod wishlist;

pub use orders::OrderRepository;
pub use products::{ProductRepository, StockAdjustment};
pub use surveys::SurveyRepository;
pub use users::UserRepository;
pub use wishlist::WishlistRepository;

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Errors from repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Underlying database error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The requested row does not exist.
    #[error("not found")]
    NotFound,

    /// A uniqueness constraint was violated.
    #[error("conflict: {0}")]
    Conflict(String),

    /// A stored value failed domain validation on the way out.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}
