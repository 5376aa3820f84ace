//! Tile cache configuration.

use serde::{Deserialize, Serialize};

/// Top-level cache configuration.
///
/// When `redis_url` is set the Redis backend is attempted first; the file
/// backend under `directory` is used otherwise, and as the fallback when
/// Redis cannot be reached at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Whether tile caching is enabled at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Root directory of the file backend.
    #[serde(default = "default_directory")]
    pub directory: String,
    /// Redis connection URL. Empty or absent selects the file backend.
    #[serde(default)]
    pub redis_url: Option<String>,
    /// Namespace applied to every key (Redis prefix / file subdirectory).
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// TTL applied when a caller does not pass one explicitly.
    #[serde(default = "default_ttl")]
    pub default_ttl_seconds: u64,
    /// Entries larger than this are never written.
    #[serde(default = "default_max_entry_size")]
    pub max_entry_size_bytes: u64,
    /// Seconds to wait for the Redis connection at startup.
    #[serde(default = "default_connect_timeout")]
    pub redis_connect_timeout_seconds: u64,
}

impl CacheConfig {
    /// Returns the Redis URL if one is configured and non-blank.
    pub fn redis_url(&self) -> Option<&str> {
        self.redis_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            directory: default_directory(),
            redis_url: None,
            namespace: default_namespace(),
            default_ttl_seconds: default_ttl(),
            max_entry_size_bytes: default_max_entry_size(),
            redis_connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_directory() -> String {
    "./data/tile-cache".to_string()
}

fn default_namespace() -> String {
    "tiles".to_string()
}

fn default_ttl() -> u64 {
    86_400
}

fn default_max_entry_size() -> u64 {
    5_242_880 // 5 MB
}

fn default_connect_timeout() -> u64 {
    5
}
