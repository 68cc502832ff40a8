//! iTunes Search API client.
//!
//! Thin wrapper over `reqwest` that issues a single `GET /search` per call and decodes
//! the provider's JSON. Mapping into domain types happens in
//! [`crate::services::media_fetcher`].

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;

/// One entry of the `results` array, in the provider's own field names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItunesMedia {
    pub wrapper_type: String,
    pub kind: String,
    pub artist_id: i64,
    pub collection_id: i64,
    pub track_id: i64,
    pub artist_name: String,
    pub collection_name: String,
    pub track_name: String,
    pub artist_view_url: String,
    pub collection_view_url: String,
    pub feed_url: String,
    pub track_view_url: String,
    pub artwork_url_30: String,
    pub artwork_url_60: String,
    pub artwork_url_100: String,
    pub release_date: String,
    pub collection_explicitness: String,
    pub track_explicitness: String,
    pub track_count: i64,
    pub track_time_millis: i64,
    pub country: String,
    pub currency: String,
    pub primary_genre_name: String,
    pub content_advisory_rating: String,
    pub artwork_url_600: String,
    pub genre_ids: Vec<String>,
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItunesSearchResponse {
    pub result_count: i64,
    pub results: Vec<ItunesMedia>,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("failed to fetch data from iTunes API: {0}")]
    Request(#[source] reqwest::Error),

    #[error("received non-200 response code: {}", .0.as_u16())]
    Status(StatusCode),

    #[error("failed to decode response: {0}")]
    Decode(#[source] reqwest::Error),
}

/// HTTP client for the iTunes Search API.
#[derive(Clone, Debug)]
pub struct ItunesClient {
    client: Client,
    base_url: String,
}

impl ItunesClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(CatalogError::Client)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search the catalog. Exactly one attempt is made.
    #[tracing::instrument(skip(self), fields(catalog.base_url = %self.base_url))]
    pub async fn search(&self, term: &str, limit: i64) -> Result<ItunesSearchResponse, CatalogError> {
        let url = format!("{}/search", self.base_url);
        let limit = limit.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[("term", term), ("limit", limit.as_str())])
            .send()
            .await
            .map_err(CatalogError::Request)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(CatalogError::Status(status));
        }

        response
            .json::<ItunesSearchResponse>()
            .await
            .map_err(CatalogError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_decodes_provider_payload() {
        let body = r#"{
            "resultCount": 1,
            "results": [{
                "wrapperType": "track",
                "kind": "song",
                "artistId": 909253,
                "collectionId": 1440857781,
                "trackId": 1440857786,
                "artistName": "Jack Johnson",
                "trackName": "Better Together",
                "artworkUrl100": "https://is1-ssl.mzstatic.com/100x100bb.jpg",
                "trackTimeMillis": 207679,
                "trackPrice": 1.29,
                "genreIds": ["21", "34"],
                "genres": ["Rock", "Music"]
            }]
        }"#;

        let response: ItunesSearchResponse = serde_json::from_str(body).expect("decode");
        assert_eq!(response.result_count, 1);
        let media = &response.results[0];
        assert_eq!(media.artist_id, 909253);
        assert_eq!(media.track_name, "Better Together");
        assert_eq!(media.artwork_url_100, "https://is1-ssl.mzstatic.com/100x100bb.jpg");
        assert_eq!(media.genre_ids, vec!["21".to_string(), "34".to_string()]);
        assert!(media.feed_url.is_empty());
    }

    #[test]
    fn empty_object_decodes_to_no_results() {
        let response: ItunesSearchResponse = serde_json::from_str("{}").expect("decode");
        assert_eq!(response.result_count, 0);
        assert!(response.results.is_empty());
    }

    #[test]
    fn status_error_reports_code() {
        let err = CatalogError::Status(StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.to_string(), "received non-200 response code: 503");
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = ItunesClient::new("http://localhost:3000/", Duration::from_secs(1)).expect("client");
        assert_eq!(client.base_url(), "http://localhost:3000");
    }
}
