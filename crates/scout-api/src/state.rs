//! Application state shared by every handler.

use std::sync::Arc;

use scout_core::ResultStore;
use scout_services::SearchMediaService;

#[derive(Clone)]
pub struct AppState {
    /// Name reported by `/health`.
    pub service_name: String,
    pub search: SearchMediaService,
    /// Probed by `/health`; the same store the search service writes to.
    pub store: Arc<dyn ResultStore>,
}

impl AppState {
    pub fn new(
        service_name: impl Into<String>,
        search: SearchMediaService,
        store: Arc<dyn ResultStore>,
    ) -> Self {
        Self {
            service_name: service_name.into(),
            search,
            store,
        }
    }
}
