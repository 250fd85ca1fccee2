//! Database migration command.
//!
//! Migrations are embedded at compile time from `crates/api/migrations/`
//! and applied explicitly; the API server never runs them at startup.

use tracing::info;

use super::CommandError;

/// Run all pending migrations.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable or a migration
/// fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = super::connect().await?;

    info!("Running migrations...");
    sqlx::migrate!("../api/migrations").run(&pool).await?;

    info!("Migrations complete");
    Ok(())
}
