//! Response DTOs.

use serde::{Deserialize, Serialize};

pub use planetiles_core::types::ErrorEnvelope;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}

/// Detailed health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedHealthResponse {
    /// `ok`, or `degraded` when the cache backend is unreachable.
    pub status: String,
    /// Version.
    pub version: String,
    /// Cache backend state.
    pub cache: CacheHealth,
    /// Planets the catalog serves.
    pub planets: Vec<String>,
}

/// Cache section of the detailed health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheHealth {
    /// Backend name: `redis`, `file` or `noop`.
    pub backend: String,
    /// Whether the backend answered its health probe.
    pub reachable: bool,
}
