//! Connection pool setup and repositories

pub mod media_result;

use anyhow::{Context, Result};
use scout_core::DatabaseConfig;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Schema migrations embedded from the workspace `migrations/` directory.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Open the connection pool shared by every request task.
///
/// The pool is lazy: no connection is made until the first query, so a database that is
/// down at startup shows up in `/health` instead of preventing the service from binding.
pub fn setup_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_open_connections)
        .acquire_timeout(config.acquire_timeout)
        .idle_timeout(config.idle_timeout)
        .max_lifetime(config.max_connection_lifetime)
        .connect_lazy(&config.dsn)
        .context("Failed to parse database connection string")?;

    tracing::info!(
        max_connections = config.max_open_connections,
        "Database pool configured"
    );

    Ok(pool)
}

/// Apply pending migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    MIGRATOR
        .run(pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");
    Ok(())
}
