//! Cache manager that dispatches to the configured backend.
//!
//! The manager is the only cache surface the rest of the application sees.
//! Every backend failure stops here: it is logged as a warning and turned
//! into a miss (reads) or a no-op (writes, deletes).

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use planetiles_core::config::cache::CacheConfig;
use planetiles_core::traits::CacheBackend;
use planetiles_core::types::CacheEntry;

use crate::file::FileCacheBackend;
use crate::noop::NoopCacheBackend;

/// Cache manager that wraps the configured backend.
///
/// The backend is selected at construction time and never changes for the
/// lifetime of the process.
#[derive(Debug, Clone)]
pub struct CacheManager {
    /// The selected backend.
    inner: Arc<dyn CacheBackend>,
    /// TTL used when callers pass none.
    default_ttl: Duration,
}

impl CacheManager {
    /// Create a cache manager from configuration.
    ///
    /// Never fails: an unreachable Redis falls back to the file backend, and
    /// a file backend that cannot create its root falls back to no caching.
    pub async fn new(config: &CacheConfig) -> Self {
        let default_ttl = Duration::from_secs(config.default_ttl_seconds);

        if !config.enabled {
            info!("Tile cache disabled");
            return Self::from_backend(Arc::new(NoopCacheBackend), default_ttl);
        }

        if let Some(url) = config.redis_url() {
            match connect_redis(url, config).await {
                Some(backend) => {
                    info!("Initializing Redis tile cache");
                    return Self::from_backend(backend, default_ttl);
                }
                None => warn!("Redis tile cache unavailable, falling back to file cache"),
            }
        }

        match FileCacheBackend::new(
            &config.directory,
            &config.namespace,
            config.max_entry_size_bytes,
        )
        .await
        {
            Ok(backend) => {
                info!(root = %backend.root().display(), "Initializing file tile cache");
                Self::from_backend(Arc::new(backend), default_ttl)
            }
            Err(e) => {
                warn!(error = %e, "File tile cache unavailable, caching disabled");
                Self::from_backend(Arc::new(NoopCacheBackend), default_ttl)
            }
        }
    }

    /// Create a cache manager from an existing backend (for testing).
    pub fn from_backend(backend: Arc<dyn CacheBackend>, default_ttl: Duration) -> Self {
        Self {
            inner: backend,
            default_ttl,
        }
    }

    /// Name of the selected backend.
    pub fn backend_name(&self) -> &'static str {
        self.inner.name()
    }

    /// TTL applied when `set` is called without one.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Look up an entry. Backend errors are reported as a miss.
    pub async fn get(&self, key: &str) -> Option<CacheEntry> {
        match self.inner.get(key).await {
            Ok(entry) => entry,
            Err(e) => {
                warn!(key, backend = self.inner.name(), error = %e, "Cache read failed");
                None
            }
        }
    }

    /// Store an entry. Backend errors are logged and dropped.
    pub async fn set(&self, key: &str, entry: &CacheEntry, ttl: Option<Duration>) {
        let ttl = ttl.unwrap_or(self.default_ttl);
        if let Err(e) = self.inner.set(key, entry, ttl).await {
            warn!(key, backend = self.inner.name(), error = %e, "Cache write failed");
        }
    }

    /// Remove an entry. Backend errors are logged and dropped.
    pub async fn delete(&self, key: &str) {
        if let Err(e) = self.inner.delete(key).await {
            warn!(key, backend = self.inner.name(), error = %e, "Cache delete failed");
        }
    }

    /// Whether the backend is currently reachable.
    pub async fn health_check(&self) -> bool {
        match self.inner.health_check().await {
            Ok(healthy) => healthy,
            Err(e) => {
                warn!(backend = self.inner.name(), error = %e, "Cache health check failed");
                false
            }
        }
    }
}

#[cfg(feature = "redis-backend")]
async fn connect_redis(url: &str, config: &CacheConfig) -> Option<Arc<dyn CacheBackend>> {
    let timeout = Duration::from_secs(config.redis_connect_timeout_seconds);
    match crate::redis::RedisClient::connect(url, &config.namespace, timeout).await {
        Ok(client) => Some(Arc::new(crate::redis::RedisCacheBackend::new(client))),
        Err(e) => {
            warn!(error = %e, "Failed to initialize Redis tile cache");
            None
        }
    }
}

#[cfg(not(feature = "redis-backend"))]
async fn connect_redis(_url: &str, _config: &CacheConfig) -> Option<Arc<dyn CacheBackend>> {
    warn!("Redis URL configured but the redis-backend feature is not compiled in");
    None
}
