//! Redis cache backend implementation.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::debug;

use planetiles_core::error::{AppError, ErrorKind};
use planetiles_core::result::AppResult;
use planetiles_core::traits::CacheBackend;
use planetiles_core::types::CacheEntry;

use super::client::RedisClient;
use super::envelope::{decode_entry, encode_entry};

/// Redis-backed tile cache.
#[derive(Debug, Clone)]
pub struct RedisCacheBackend {
    /// Redis client.
    client: RedisClient,
}

impl RedisCacheBackend {
    /// Create a new Redis cache backend.
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    /// Map a Redis error to an AppError.
    fn map_err(e: redis::RedisError) -> AppError {
        AppError::with_source(ErrorKind::Cache, format!("Redis error: {e}"), e)
    }
}

#[async_trait]
impl CacheBackend for RedisCacheBackend {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn get(&self, key: &str) -> AppResult<Option<CacheEntry>> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let raw: Option<String> = conn.get(&full_key).await.map_err(Self::map_err)?;
        raw.map(|raw| decode_entry(&raw)).transpose()
    }

    async fn set(&self, key: &str, entry: &CacheEntry, ttl: Duration) -> AppResult<()> {
        let full_key = self.client.prefixed_key(key);
        let payload = encode_entry(entry)?;
        // EX must be at least one second.
        let seconds = ttl.as_secs().max(1);
        let mut conn = self.client.conn_mut();
        let _: () = conn
            .set_ex(&full_key, payload, seconds)
            .await
            .map_err(Self::map_err)?;
        debug!(key, bytes = entry.len(), ttl_seconds = seconds, "Stored tile in Redis");
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let _: () = conn.del(&full_key).await.map_err(Self::map_err)?;
        Ok(())
    }

    async fn health_check(&self) -> AppResult<bool> {
        let mut conn = self.client.conn_mut();
        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(Self::map_err)?;
        Ok(pong == "PONG")
    }
}
