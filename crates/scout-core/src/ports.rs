//! Capability ports consumed by the search orchestrator
//!
//! Each port has one production adapter (iTunes over HTTP, PostgreSQL) and one
//! in-memory adapter used by tests.

use async_trait::async_trait;

use crate::error::{FetchError, PersistError};
use crate::models::SearchResult;

/// Source of catalog results.
///
/// Implementations own network I/O, timeouts and translation of the provider schema
/// into [`SearchResult`]. A single attempt is made per call.
#[async_trait]
pub trait MediaFetcher: Send + Sync {
    async fn fetch_by_term(&self, term: &str, limit: i64) -> Result<SearchResult, FetchError>;
}

/// Append-only record of search results.
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Persist a result and return the generated identifier.
    async fn insert(&self, result: &SearchResult) -> Result<i64, PersistError>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), PersistError>;
}
