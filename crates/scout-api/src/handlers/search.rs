//! Media search endpoint: query decoding, response encoding and the handler itself.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use scout_core::{AppError, MediaItem, SearchRequest, SearchResult, DEFAULT_SEARCH_LIMIT};
use serde::Serialize;

use crate::error::HttpAppError;
use crate::state::AppState;

/// The query string cannot be turned into a [`SearchRequest`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct DecodeError(String);

impl From<DecodeError> for AppError {
    fn from(err: DecodeError) -> Self {
        AppError::InvalidInput(err.0)
    }
}

/// One media entry as returned to API clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaResponse {
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

impl From<MediaItem> for MediaResponse {
    fn from(m: MediaItem) -> Self {
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

/// Body of a successful search. `id` is `null` when the result was not stored.
#[derive(Debug, Clone, Serialize)]
pub struct SearchMediaResponse {
    pub id: Option<i64>,
    pub search_term: String,
    pub result_count: i64,
    pub media: Vec<MediaResponse>,
}

impl From<SearchResult> for SearchMediaResponse {
    fn from(result: SearchResult) -> Self {
        Self {
            id: result.id,
            search_term: result.search_term,
            result_count: result.item_count,
            media: result.items.into_iter().map(MediaResponse::from).collect(),
        }
    }
}

/// First value of `key` in query order. Later repeats of the key are ignored.
fn first_param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Build a [`SearchRequest`] from query parameters, in the order they appeared.
///
/// `term` is required. A missing or non-integer `limit` falls back to
/// [`DEFAULT_SEARCH_LIMIT`]; any integer, including zero or negative, is kept as is.
pub fn decode_search_request(params: &[(String, String)]) -> Result<SearchRequest, DecodeError> {
    let limit = first_param(params, "limit")
        .and_then(|l| l.parse::<i64>().ok())
        .unwrap_or(DEFAULT_SEARCH_LIMIT);

    let term = match first_param(params, "term") {
        Some(term) if !term.is_empty() => term.to_string(),
        _ => return Err(DecodeError("term shouldn't be empty".to_string())),
    };

    Ok(SearchRequest { term, limit })
}

/// Render a search response.
///
/// `None` or a serialization failure becomes a 400 with an `errors` body.
pub fn encode_search_response(response: Option<&SearchMediaResponse>) -> Response {
    let Some(response) = response else {
        return HttpAppError(AppError::Encode(
            "failed to parse search media response, got none".to_string(),
        ))
        .into_response();
    };

    match serde_json::to_vec(response) {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(e) => HttpAppError(AppError::Encode(format!(
            "failed to encode search media response: {}",
            e
        )))
        .into_response(),
    }
}

/// `GET /media/search?term=<term>&limit=<limit>`
pub async fn search_media(
    State(state): State<Arc<AppState>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Response, HttpAppError> {
    let Query(params) = query.map_err(|rejection| AppError::InvalidInput(rejection.body_text()))?;
    let request = decode_search_request(&params).map_err(AppError::from)?;

    let result = state
        .search
        .fetch_and_persist(&request.term, request.limit)
        .await?;

    if !result.is_persisted() {
        tracing::warn!(search.term = %request.term, "Returning search result that was not stored");
    }

    let response = SearchMediaResponse::from(result);
    Ok(encode_search_response(Some(&response)))
}
