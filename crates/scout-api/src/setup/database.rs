//! Database setup and initialization

use anyhow::{Context, Result};
use scout_core::Config;
use sqlx::PgPool;

/// Setup the connection pool and, unless disabled, apply migrations.
pub async fn setup_database(config: &Config) -> Result<PgPool> {
    tracing::info!("Configuring database pool...");
    let pool = scout_db::setup_pool(&config.db).context("Failed to configure database pool")?;

    if config.db.run_migrations {
        scout_db::run_migrations(&pool).await?;
    } else {
        tracing::info!("Skipping database migrations (DB__RUN_MIGRATIONS=false)");
    }

    Ok(pool)
}
