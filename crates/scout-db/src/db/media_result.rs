//! Media result repository: append-only writes to the media_result table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use scout_core::{MediaItem, PersistError, ResultStore, SearchResult};
use serde::{Deserialize, Serialize};
use sqlx::types::JsonValue;
use sqlx::{Connection, PgConnection, PgPool, Postgres};

/// Persisted shape of one media item inside the `returned_result` JSONB column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaRecord {
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

impl From<&MediaItem> for MediaRecord {
    fn from(m: &MediaItem) -> Self {
        Self {
            wrapper_type: m.wrapper_type.clone(),
            kind: m.kind.clone(),
            artist_id: m.artist_id,
            collection_id: m.collection_id,
            track_id: m.track_id,
            artist_name: m.artist_name.clone(),
            collection_name: m.collection_name.clone(),
            track_name: m.track_name.clone(),
            artist_view_url: m.artist_view_url.clone(),
            collection_view_url: m.collection_view_url.clone(),
            feed_url: m.feed_url.clone(),
            track_view_url: m.track_view_url.clone(),
            artwork_url_30: m.artwork_url_30.clone(),
            artwork_url_60: m.artwork_url_60.clone(),
            artwork_url_100: m.artwork_url_100.clone(),
            release_date: m.release_date.clone(),
            collection_explicitness: m.collection_explicitness.clone(),
            track_explicitness: m.track_explicitness.clone(),
            track_count: m.track_count,
            track_time_millis: m.track_time_millis,
            country: m.country.clone(),
            currency: m.currency.clone(),
            primary_genre_name: m.primary_genre_name.clone(),
            content_advisory_rating: m.content_advisory_rating.clone(),
            artwork_url_600: m.artwork_url_600.clone(),
            genre_ids: m.genre_ids.clone(),
            genres: m.genres.clone(),
        }
    }
}

impl From<MediaRecord> for MediaItem {
    fn from(r: MediaRecord) -> Self {
        Self {
            wrapper_type: r.wrapper_type,
            kind: r.kind,
            artist_id: r.artist_id,
            collection_id: r.collection_id,
            track_id: r.track_id,
            artist_name: r.artist_name,
            collection_name: r.collection_name,
            track_name: r.track_name,
            artist_view_url: r.artist_view_url,
            collection_view_url: r.collection_view_url,
            feed_url: r.feed_url,
            track_view_url: r.track_view_url,
            artwork_url_30: r.artwork_url_30,
            artwork_url_60: r.artwork_url_60,
            artwork_url_100: r.artwork_url_100,
            release_date: r.release_date,
            collection_explicitness: r.collection_explicitness,
            track_explicitness: r.track_explicitness,
            track_count: r.track_count,
            track_time_millis: r.track_time_millis,
            country: r.country,
            currency: r.currency,
            primary_genre_name: r.primary_genre_name,
            content_advisory_rating: r.content_advisory_rating,
            artwork_url_600: r.artwork_url_600,
            genre_ids: r.genre_ids,
            genres: r.genres,
        }
    }
}

/// Serialize media records into the JSONB blob.
pub fn encode_media(records: &[MediaRecord]) -> Result<JsonValue, serde_json::Error> {
    serde_json::to_value(records)
}

/// Inverse of [`encode_media`]. A missing column value or JSON `null` decodes to an
/// empty list.
pub fn decode_media(raw: Option<JsonValue>) -> Result<Vec<MediaRecord>, serde_json::Error> {
    match raw {
        None | Some(JsonValue::Null) => Ok(Vec::new()),
        Some(value) => serde_json::from_value(value),
    }
}

/// Row type for media_result table (for FromRow).
#[derive(Debug, sqlx::FromRow)]
struct MediaResultRow {
    id: i64,
    search_term: String,
    returned_result: Option<JsonValue>,
    result_count: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl MediaResultRow {
    fn into_search_result(self) -> Result<SearchResult, serde_json::Error> {
        let items = decode_media(self.returned_result)?
            .into_iter()
            .map(MediaItem::from)
            .collect();
        Ok(SearchResult {
            id: Some(self.id),
            search_term: self.search_term,
            items,
            item_count: self.result_count,
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
        })
    }
}

/// Repository for media_result table.
#[derive(Clone)]
pub struct MediaResultRepository {
    pool: PgPool,
}

impl MediaResultRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a search result and return the generated id.
    #[tracing::instrument(
        skip(self, result),
        fields(db.table = "media_result", db.operation = "insert", search.term = %result.search_term)
    )]
    pub async fn insert_media(&self, result: &SearchResult) -> Result<i64, PersistError> {
        let records: Vec<MediaRecord> = result.items.iter().map(MediaRecord::from).collect();
        let blob = encode_media(&records)?;
        let now = Utc::now();

        let id = sqlx::query_scalar::<Postgres, i64>(
            r#"
            INSERT INTO media_result (search_term, returned_result, result_count, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&result.search_term)
        .bind(blob)
        .bind(result.item_count)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    /// Fetch a stored search result by id.
    #[tracing::instrument(skip(self), fields(db.table = "media_result", db.operation = "select", db.record_id = id))]
    pub async fn find_by_id(&self, id: i64) -> Result<Option<SearchResult>, PersistError> {
        let row = sqlx::query_as::<Postgres, MediaResultRow>(
            "SELECT id, search_term, returned_result, result_count, created_at, updated_at FROM media_result WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(MediaResultRow::into_search_result)
            .transpose()
            .map_err(PersistError::from)
    }
}

#[async_trait]
impl ResultStore for MediaResultRepository {
    async fn insert(&self, result: &SearchResult) -> Result<i64, PersistError> {
        self.insert_media(result).await
    }

    /// Ping an idle pooled connection if there is one, otherwise dial the server once.
    ///
    /// Acquiring through the pool retries refused connects until the acquire timeout
    /// and then reports only `PoolTimedOut`, so the direct dial is what surfaces the
    /// underlying I/O error.
    #[tracing::instrument(skip(self), fields(db.operation = "ping"))]
    async fn ping(&self) -> Result<(), PersistError> {
        let unavailable = |e: sqlx::Error| PersistError::Unavailable(e.to_string());

        if let Some(mut conn) = self.pool.try_acquire() {
            return conn.ping().await.map_err(unavailable);
        }

        let options = self.pool.connect_options();
        let mut conn = PgConnection::connect_with(&options)
            .await
            .map_err(unavailable)?;
        conn.ping().await.map_err(unavailable)?;
        conn.close().await.map_err(unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;
    use std::time::{Duration, Instant};

    fn record(track_id: i64, name: &str) -> MediaRecord {
        MediaRecord {
            wrapper_type: "track".to_string(),
            kind: "song".to_string(),
            artist_id: 123,
            track_id,
            artist_name: "Test Artist".to_string(),
            track_name: name.to_string(),
            artwork_url_100: "https://example.com/100x100bb.jpg".to_string(),
            genre_ids: vec!["21".to_string(), "34".to_string()],
            genres: vec!["Rock".to_string(), "Music".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn encode_then_decode_is_identity() {
        let records = vec![record(1, "First"), record(2, "Second")];
        let blob = encode_media(&records).expect("encode");
        let decoded = decode_media(Some(blob)).expect("decode");
        assert_eq!(decoded, records);
    }

    #[test]
    fn absent_or_null_blob_decodes_to_empty() {
        assert!(decode_media(None).expect("decode").is_empty());
        assert!(decode_media(Some(JsonValue::Null)).expect("decode").is_empty());
    }

    #[test]
    fn blob_uses_provider_field_names() {
        let blob = encode_media(&[record(456, "Test Track")]).expect("encode");
        let first = &blob[0];
        assert_eq!(first["wrapperType"], "track");
        assert_eq!(first["trackId"], 456);
        assert_eq!(first["artworkUrl100"], "https://example.com/100x100bb.jpg");
        assert_eq!(first["genreIds"][1], "34");
    }

    #[test]
    fn malformed_blob_is_an_error() {
        let err = decode_media(Some(serde_json::json!({"not": "a list"})));
        assert!(err.is_err());
    }

    #[test]
    fn domain_mapping_is_lossless() {
        let item = MediaItem {
            wrapper_type: "collection".to_string(),
            collection_id: 99,
            collection_name: "Album".to_string(),
            track_count: 12,
            track_time_millis: 215_000,
            country: "USA".to_string(),
            currency: "USD".to_string(),
            genres: vec!["Pop".to_string()],
            ..Default::default()
        };
        let round_tripped = MediaItem::from(MediaRecord::from(&item));
        assert_eq!(round_tripped, item);
    }

    #[test]
    fn row_decodes_into_search_result() {
        let now = Utc::now();
        let row = MediaResultRow {
            id: 7,
            search_term: "test".to_string(),
            returned_result: Some(encode_media(&[record(456, "Test Track")]).expect("encode")),
            result_count: 1,
            created_at: now,
            updated_at: now,
        };
        let result = row.into_search_result().expect("decode");
        assert_eq!(result.id, Some(7));
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].track_name, "Test Track");
        assert_eq!(result.created_at, Some(now));
    }

    #[tokio::test]
    async fn ping_surfaces_refused_connection_promptly() {
        // Nothing listens on port 1; the pool alone would retry for the full acquire timeout.
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_secs(30))
            .connect_lazy("postgres://u:p@127.0.0.1:1/db")
            .expect("lazy pool");
        let repo = MediaResultRepository::new(pool);

        let started = Instant::now();
        let err = repo.ping().await.unwrap_err();

        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(matches!(err, PersistError::Unavailable(_)));
        assert!(
            err.to_string().to_lowercase().contains("refused"),
            "unexpected ping error: {}",
            err
        );
    }
}
