//! Media Scout Core Library
//!
//! This crate provides the domain models, port traits, error types and configuration
//! shared by every media-scout component.

pub mod config;
pub mod error;
pub mod models;
pub mod ports;

// Re-export commonly used types
pub use config::{
    CatalogConfig, Config, DatabaseConfig, HttpConfig, LogFormat, OtelConfig, OtelSampler,
    OtlpProtocol, ServiceConfig,
};
pub use error::{AppError, ErrorMetadata, FetchError, LogLevel, PersistError, SearchError};
pub use models::{MediaItem, SearchRequest, SearchResult, DEFAULT_SEARCH_LIMIT};
pub use ports::{MediaFetcher, ResultStore};
