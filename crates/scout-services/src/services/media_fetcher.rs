//! Catalog fetcher backed by the iTunes Search API.

use async_trait::async_trait;
use scout_core::{FetchError, MediaFetcher, MediaItem, SearchResult};

use super::itunes::{ItunesClient, ItunesMedia};

impl From<ItunesMedia> for MediaItem {
    fn from(m: ItunesMedia) -> Self {
        Self {
            wrapper_type: m.wrapper_type,
            kind: m.kind,
            artist_id: m.artist_id,
            collection_id: m.collection_id,
            track_id: m.track_id,
            artist_name: m.artist_name,
            collection_name: m.collection_name,
            track_name: m.track_name,
            artist_view_url: m.artist_view_url,
            collection_view_url: m.collection_view_url,
            feed_url: m.feed_url,
            track_view_url: m.track_view_url,
            artwork_url_30: m.artwork_url_30,
            artwork_url_60: m.artwork_url_60,
            artwork_url_100: m.artwork_url_100,
            release_date: m.release_date,
            collection_explicitness: m.collection_explicitness,
            track_explicitness: m.track_explicitness,
            track_count: m.track_count,
            track_time_millis: m.track_time_millis,
            country: m.country,
            currency: m.currency,
            primary_genre_name: m.primary_genre_name,
            content_advisory_rating: m.content_advisory_rating,
            artwork_url_600: m.artwork_url_600,
            genre_ids: m.genre_ids,
            genres: m.genres,
        }
    }
}

/// [`MediaFetcher`] over [`ItunesClient`].
#[derive(Clone, Debug)]
pub struct ItunesMediaFetcher {
    client: ItunesClient,
}

impl ItunesMediaFetcher {
    pub fn new(client: ItunesClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MediaFetcher for ItunesMediaFetcher {
    async fn fetch_by_term(&self, term: &str, limit: i64) -> Result<SearchResult, FetchError> {
        let response = self
            .client
            .search(term, limit)
            .await
            .map_err(FetchError::new)?;

        let items: Vec<MediaItem> = response.results.into_iter().map(MediaItem::from).collect();
        if response.result_count != items.len() as i64 {
            tracing::debug!(
                reported = response.result_count,
                received = items.len(),
                "Catalog resultCount differs from returned results"
            );
        }

        Ok(SearchResult::new(term, items))
    }
}
