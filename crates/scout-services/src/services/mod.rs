pub mod itunes;
pub mod media_fetcher;
pub mod search_media;
