//! Health check handler.
//!
//! Probes the result store only; the catalog is never contacted.

use crate::constants::HEALTH_CHECK_TIMEOUT_SECS;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;
use std::time::Duration;

/// `200 "<service> is healthy"` or `503 "<service> is unavailable due to db unavailability: <cause>"`.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let timeout = Duration::from_secs(HEALTH_CHECK_TIMEOUT_SECS);

    let cause = match tokio::time::timeout(timeout, state.store.ping()).await {
        Ok(Ok(())) => None,
        Ok(Err(e)) => Some(e.to_string()),
        Err(_) => Some("timeout".to_string()),
    };

    match cause {
        None => (
            StatusCode::OK,
            format!("{} is healthy", state.service_name),
        ),
        Some(cause) => {
            tracing::error!(error = %cause, "Database health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                format!(
                    "{} is unavailable due to db unavailability: {}",
                    state.service_name, cause
                ),
            )
        }
    }
}
