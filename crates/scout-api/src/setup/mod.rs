//! Application setup and initialization
//!
//! Everything `main` needs before serving: telemetry, the database pool, the service
//! graph and the router.

pub mod database;
pub mod routes;
pub mod server;
pub mod services;

use crate::state::AppState;
use anyhow::Result;
use scout_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: &Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Initialize telemetry first
    crate::telemetry::init_telemetry(&config.service, &config.otel)
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        service = %config.service_name(),
        environment = %config.service.environment,
        "Configuration loaded and validated successfully"
    );

    // Setup database
    let pool = database::setup_database(config).await?;

    // Initialize the catalog client, store and search service
    let state = services::initialize_services(config, pool)?;

    // Setup routes
    let router = routes::setup_routes(state.clone(), config.cors_origins())?;

    Ok((state, router))
}
