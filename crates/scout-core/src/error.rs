//! Error types module
//!
//! Port errors (`FetchError`, `PersistError`) are produced by adapters, `SearchError` by
//! the orchestrator, and `AppError` is what the HTTP layer renders.
//!
//! Every message already embeds its cause, so no variant re-exposes it as a `source`.
//!
//! The `Database` variant of `PersistError` carries the `sqlx` error when the `sqlx`
//! feature is enabled and a plain message otherwise.

use std::error::Error as StdError;

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

/// Boxed error used as the cause of port failures.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for upstream issues the service cannot fix
    Warn,
}

/// Metadata for error responses - lets errors describe how they are presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "FETCH_ERROR")
    fn error_code(&self) -> &'static str;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

/// The catalog could not be queried or returned something unusable.
#[derive(Debug, thiserror::Error)]
#[error("failed to fetch media by term: {cause}")]
pub struct FetchError {
    cause: BoxError,
}

impl FetchError {
    pub fn new(cause: impl Into<BoxError>) -> Self {
        Self {
            cause: cause.into(),
        }
    }

    /// The adapter error this fetch failure wraps.
    pub fn cause(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.cause.as_ref()
    }
}

/// The store could not be reached or rejected the write.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("failed to marshal media result: {0}")]
    Encode(#[from] serde_json::Error),

    #[cfg(feature = "sqlx")]
    #[error("failed to insert media to db: {0}")]
    Database(SqlxError),

    #[cfg(not(feature = "sqlx"))]
    #[error("failed to insert media to db: {0}")]
    Database(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for PersistError {
    fn from(err: SqlxError) -> Self {
        PersistError::Database(err)
    }
}

/// Failure of the fetch-and-persist operation. Persist failures never appear here.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("failed to fetch media: {0}")]
    Fetch(FetchError),
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidInput(String),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("{0}")]
    Encode(String),
}

impl AppError {
    /// Get the error type name for logging
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::Search(_) => "Search",
            AppError::Encode(_) => "Encode",
        }
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        match self {
            AppError::InvalidInput(_) | AppError::Encode(_) => 400,
            AppError::Search(SearchError::Fetch(_)) => 502,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::Search(SearchError::Fetch(_)) => "FETCH_ERROR",
            AppError::Encode(_) => "ENCODE_ERROR",
        }
    }

    fn log_level(&self) -> LogLevel {
        match self {
            AppError::InvalidInput(_) | AppError::Encode(_) => LogLevel::Debug,
            AppError::Search(_) => LogLevel::Warn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_wraps_cause() {
        let err = FetchError::new("search error");
        assert_eq!(err.to_string(), "failed to fetch media by term: search error");
        assert_eq!(err.cause().to_string(), "search error");
        assert!(err.source().is_none());
    }

    #[test]
    fn search_error_keeps_causal_chain() {
        let err = SearchError::Fetch(FetchError::new("search error"));
        assert_eq!(
            err.to_string(),
            "failed to fetch media: failed to fetch media by term: search error"
        );
        // The chain is already in the message; exposing it again would repeat it in logs.
        assert!(err.source().is_none());
    }

    #[test]
    fn app_error_metadata() {
        let invalid = AppError::InvalidInput("term shouldn't be empty".to_string());
        assert_eq!(invalid.http_status_code(), 400);
        assert_eq!(invalid.error_code(), "INVALID_INPUT");
        assert_eq!(invalid.to_string(), "term shouldn't be empty");

        let fetch: AppError = SearchError::Fetch(FetchError::new("boom")).into();
        assert_eq!(fetch.http_status_code(), 502);
        assert_eq!(fetch.log_level(), LogLevel::Warn);
        assert_eq!(fetch.error_code(), "FETCH_ERROR");
        assert_eq!(
            fetch.to_string(),
            "failed to fetch media: failed to fetch media by term: boom"
        );
    }

    #[test]
    fn persist_error_messages() {
        let err = PersistError::Unavailable("insert error".to_string());
        assert_eq!(err.to_string(), "store unavailable: insert error");
    }
}
