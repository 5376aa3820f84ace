//! Backend used when caching is disabled.

use std::time::Duration;

use async_trait::async_trait;

use planetiles_core::result::AppResult;
use planetiles_core::traits::CacheBackend;
use planetiles_core::types::CacheEntry;

/// A backend that never stores anything.
#[derive(Debug, Clone, Default)]
pub struct NoopCacheBackend;

#[async_trait]
impl CacheBackend for NoopCacheBackend {
    fn name(&self) -> &'static str {
        "noop"
    }

    async fn get(&self, _key: &str) -> AppResult<Option<CacheEntry>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _entry: &CacheEntry, _ttl: Duration) -> AppResult<()> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> AppResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
