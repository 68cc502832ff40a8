//! Tracing setup
//!
//! Console logging is always available. OTLP span export is compiled in with the
//! `observability-opentelemetry` feature and switched on with `OTEL_ENABLED`.

mod init;

#[cfg(feature = "observability-opentelemetry")]
mod init_opentelemetry;

pub use init::{init_telemetry, shutdown_telemetry, DEFAULT_FILTER};
