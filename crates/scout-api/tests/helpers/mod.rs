//! Test helpers: build AppState and router over in-memory adapters.
//!
//! Run from workspace root: `cargo test -p scout-api`. No database or network is needed.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use scout_api::constants;
use scout_api::setup::routes;
use scout_api::state::AppState;
use scout_services::test_helpers::{FakeMediaFetcher, InMemoryResultStore};
use scout_services::SearchMediaService;

pub const TEST_SERVICE_NAME: &str = "media-scout";

/// API path prefix for tests (e.g. `/api/v1`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

/// Test application: server plus handles on the fakes behind it.
pub struct TestApp {
    pub server: TestServer,
    pub fetcher: Arc<FakeMediaFetcher>,
    pub store: Arc<InMemoryResultStore>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

/// Router over the given fakes, with wildcard CORS.
pub fn build_router(fetcher: Arc<FakeMediaFetcher>, store: Arc<InMemoryResultStore>) -> Router {
    let search = SearchMediaService::new(fetcher, store.clone());
    let state = Arc::new(AppState::new(TEST_SERVICE_NAME, search, store));
    routes::setup_routes(state, &["*".to_string()]).expect("Failed to build router")
}

pub fn setup_test_app(fetcher: FakeMediaFetcher, store: InMemoryResultStore) -> TestApp {
    let fetcher = Arc::new(fetcher);
    let store = Arc::new(store);
    let router = build_router(fetcher.clone(), store.clone());
    let server = TestServer::new(router.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        fetcher,
        store,
    }
}
