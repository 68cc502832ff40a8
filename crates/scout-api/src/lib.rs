//! Media Scout API Library
//!
//! This crate provides the HTTP handlers, the service worker and application setup.

pub mod constants;
pub mod error;
pub mod handlers;
pub mod setup;
pub mod state;
pub mod telemetry;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use setup::server::{HttpWorker, WorkerError, WorkerState};
pub use state::AppState;
