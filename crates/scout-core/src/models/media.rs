/// A single catalog entry.
///
/// The orchestrator never interprets individual fields; it only carries them from the
/// fetcher to the store and back to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaItem {
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
