//! Route configuration and setup.
//!
//! API routes live under [`API_PREFIX`]; the health check is served at the root.

mod health;

use crate::constants::API_PREFIX;
use crate::handlers;
use crate::state::AppState;
use anyhow::Context;
use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(
    state: Arc<AppState>,
    cors_origins: &[String],
) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(cors_origins)?;

    let api_routes = Router::new().route("/media/search", get(handlers::search::search_media));

    let router = Router::new()
        .route("/health", get(health::health_check))
        .nest(API_PREFIX, api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    Ok(router)
}

fn setup_cors(origins: &[String]) -> Result<CorsLayer, anyhow::Error> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        return Ok(cors.allow_origin(Any));
    }

    let origins = origins
        .iter()
        .map(|o| {
            o.parse::<HeaderValue>()
                .with_context(|| format!("Invalid CORS origin: {}", o))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(cors.allow_origin(origins))
}
