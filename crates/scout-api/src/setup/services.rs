//! Service graph wiring

use std::sync::Arc;

use anyhow::{Context, Result};
use scout_core::{Config, MediaFetcher, ResultStore};
use scout_db::MediaResultRepository;
use scout_services::{ItunesClient, ItunesMediaFetcher, SearchMediaService};
use sqlx::PgPool;

use crate::state::AppState;

/// Build the production adapters and the state shared by handlers.
pub fn initialize_services(config: &Config, pool: PgPool) -> Result<Arc<AppState>> {
    let client = ItunesClient::new(config.catalog.base_url.clone(), config.catalog.timeout)
        .context("Failed to create catalog client")?;
    tracing::info!(
        base_url = %client.base_url(),
        timeout = ?config.catalog.timeout,
        "Catalog client initialized"
    );

    let fetcher: Arc<dyn MediaFetcher> = Arc::new(ItunesMediaFetcher::new(client));
    let store: Arc<dyn ResultStore> = Arc::new(MediaResultRepository::new(pool));
    let search = SearchMediaService::new(fetcher, store.clone());

    Ok(Arc::new(AppState::new(config.service_name(), search, store)))
}
