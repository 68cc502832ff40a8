//! API constants

/// Versioned prefix for every API route.
pub const API_PREFIX: &str = "/api/v1";

/// Upper bound for the store probe behind `/health`.
pub const HEALTH_CHECK_TIMEOUT_SECS: u64 = 5;
