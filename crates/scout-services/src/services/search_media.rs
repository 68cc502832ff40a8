//! Search orchestration: fetch from the catalog, then record the result.
//!
//! The store write is best-effort. A failed insert is logged and the caller still
//! gets the fetched result, with `id` left unset.

use std::sync::Arc;

use scout_core::{MediaFetcher, ResultStore, SearchError, SearchResult};

#[derive(Clone)]
pub struct SearchMediaService {
    fetcher: Arc<dyn MediaFetcher>,
    store: Arc<dyn ResultStore>,
}

impl SearchMediaService {
    pub fn new(fetcher: Arc<dyn MediaFetcher>, store: Arc<dyn ResultStore>) -> Self {
        Self { fetcher, store }
    }

    /// Fetch media for `term` and persist the result.
    ///
    /// Fails only when the fetch fails; in that case nothing is persisted.
    #[tracing::instrument(skip_all, fields(search.term = %term, search.limit = limit))]
    pub async fn fetch_and_persist(&self, term: &str, limit: i64) -> Result<SearchResult, SearchError> {
        let mut result = match self.fetcher.fetch_by_term(term, limit).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch media");
                return Err(SearchError::Fetch(e));
            }
        };

        match self.store.insert(&result).await {
            Ok(id) => {
                result.id = Some(id);
                tracing::debug!(id, item_count = result.item_count, "Search result persisted");
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to insert media");
            }
        }

        Ok(result)
    }
}
