//! Media Scout Services Layer
//!
//! This crate hosts the search orchestration and the catalog adapter. The API crate
//! wires these to the PostgreSQL store and keeps HTTP handling thin.

pub mod services;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use services::itunes::{CatalogError, ItunesClient, ItunesMedia, ItunesSearchResponse};
pub use services::media_fetcher::ItunesMediaFetcher;
pub use services::search_media::SearchMediaService;
