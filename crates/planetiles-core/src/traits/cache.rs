//! Cache backend trait for pluggable tile storage.

use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::CacheEntry;

/// Trait for tile cache backends (filesystem, Redis, no-op).
///
/// Backends report failures through [`AppResult`]; callers go through the
/// cache manager, which turns every error into a miss or a no-op. A backend
/// must be safe to call concurrently from many in-flight requests.
#[async_trait]
pub trait CacheBackend: Send + Sync + std::fmt::Debug + 'static {
    /// Short backend name used in logs and health output.
    fn name(&self) -> &'static str;

    /// Get an entry by key. Returns `None` if absent or expired.
    async fn get(&self, key: &str) -> AppResult<Option<CacheEntry>>;

    /// Store an entry for `ttl`.
    async fn set(&self, key: &str, entry: &CacheEntry, ttl: Duration) -> AppResult<()>;

    /// Remove an entry. Removing a missing key is not an error.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
