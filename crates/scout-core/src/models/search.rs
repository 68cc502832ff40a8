use chrono::{DateTime, Utc};

use super::MediaItem;

/// Limit applied when a request carries no usable `limit` parameter.
pub const DEFAULT_SEARCH_LIMIT: i64 = 20;

/// A decoded search request, ready for the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub term: String,
    pub limit: i64,
}

/// Result of one search, built fresh from fetcher output for every request.
///
/// `id` stays `None` unless the store accepted the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub id: Option<i64>,
    pub search_term: String,
    pub items: Vec<MediaItem>,
    pub item_count: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl SearchResult {
    /// Build an unpersisted result; `item_count` always mirrors `items.len()`.
    pub fn new(search_term: impl Into<String>, items: Vec<MediaItem>) -> Self {
        let item_count = items.len() as i64;
        Self {
            id: None,
            search_term: search_term.into(),
            items,
            item_count,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}
