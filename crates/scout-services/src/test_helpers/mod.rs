//! In-memory port adapters for tests.
//!
//! Enabled for this crate's own tests and, via the `test-helpers` feature, for
//! downstream test suites.

use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use scout_core::{FetchError, MediaFetcher, MediaItem, PersistError, ResultStore, SearchResult};

/// A single track with recognisable values.
pub fn sample_media() -> MediaItem {
    MediaItem {
        wrapper_type: "track".to_string(),
        kind: "song".to_string(),
        artist_id: 123,
        track_id: 456,
        artist_name: "Test Artist".to_string(),
        track_name: "Test Track".to_string(),
        ..Default::default()
    }
}

enum FetchOutcome {
    Items(Vec<MediaItem>),
    Fail(String),
}

/// Fetcher that returns a configured outcome and records every call.
pub struct FakeMediaFetcher {
    outcome: FetchOutcome,
    delay: Option<Duration>,
    calls: Mutex<Vec<(String, i64)>>,
}

impl FakeMediaFetcher {
    pub fn returning(items: Vec<MediaItem>) -> Self {
        Self {
            outcome: FetchOutcome::Items(items),
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: FetchOutcome::Fail(message.into()),
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Sleep before answering, to keep a request in flight.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// `(term, limit)` of every call so far.
    pub fn calls(&self) -> Vec<(String, i64)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl MediaFetcher for FakeMediaFetcher {
    async fn fetch_by_term(&self, term: &str, limit: i64) -> Result<SearchResult, FetchError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((term.to_string(), limit));
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.outcome {
            FetchOutcome::Items(items) => Ok(SearchResult::new(term, items.clone())),
            FetchOutcome::Fail(message) => Err(FetchError::new(message.clone())),
        }
    }
}

/// Store that keeps results in memory and hands out sequential ids starting at 1.
#[derive(Default)]
pub struct InMemoryResultStore {
    next_id: AtomicI64,
    insert_calls: AtomicUsize,
    fail_inserts: AtomicBool,
    unreachable: Mutex<Option<String>>,
    results: Mutex<Vec<SearchResult>>,
}

impl InMemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every insert fails with `PersistError::Unavailable`.
    pub fn failing_inserts() -> Self {
        let store = Self::default();
        store.fail_inserts.store(true, Ordering::SeqCst);
        store
    }

    /// `ping` fails with the given cause until cleared.
    pub fn set_unreachable(&self, cause: Option<&str>) {
        if let Ok(mut unreachable) = self.unreachable.lock() {
            *unreachable = cause.map(str::to_string);
        }
    }

    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    /// Results accepted so far, with their assigned ids.
    pub fn stored(&self) -> Vec<SearchResult> {
        self.results.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ResultStore for InMemoryResultStore {
    async fn insert(&self, result: &SearchResult) -> Result<i64, PersistError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(PersistError::Unavailable("insert error".to_string()));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let mut stored = result.clone();
        stored.id = Some(id);
        if let Ok(mut results) = self.results.lock() {
            results.push(stored);
        }
        Ok(id)
    }

    async fn ping(&self) -> Result<(), PersistError> {
        let cause = self.unreachable.lock().ok().and_then(|u| u.clone());
        match cause {
            Some(cause) => Err(PersistError::Unavailable(cause)),
            None => Ok(()),
        }
    }
}
