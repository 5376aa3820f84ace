//! Redis connection management.

use std::time::Duration;

use redis::Client;
use redis::aio::ConnectionManager;
use tracing::info;

use planetiles_core::error::{AppError, ErrorKind};
use planetiles_core::result::AppResult;

/// Redis client wrapper around one shared, multiplexed connection.
#[derive(Clone)]
pub struct RedisClient {
    /// Reconnecting connection manager shared by every request.
    conn: ConnectionManager,
    /// Namespace prepended to every key.
    namespace: String,
}

impl std::fmt::Debug for RedisClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisClient")
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

impl RedisClient {
    /// Connect to Redis, giving up after `connect_timeout`.
    pub async fn connect(url: &str, namespace: &str, connect_timeout: Duration) -> AppResult<Self> {
        info!(url = %mask_redis_url(url), "Connecting to Redis");

        let client = Client::open(url).map_err(|e| {
            AppError::with_source(ErrorKind::Cache, "Failed to create Redis client", e)
        })?;

        let conn = tokio::time::timeout(connect_timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| AppError::cache("Timed out connecting to Redis"))?
            .map_err(|e| AppError::with_source(ErrorKind::Cache, "Failed to connect to Redis", e))?;

        info!("Successfully connected to Redis");
        Ok(Self {
            conn,
            namespace: namespace.to_string(),
        })
    }

    /// Get a clone of the connection manager for one command.
    pub fn conn_mut(&self) -> ConnectionManager {
        self.conn.clone()
    }

    /// Build a full key with the configured namespace.
    pub fn prefixed_key(&self, key: &str) -> String {
        prefixed(&self.namespace, key)
    }
}

fn prefixed(namespace: &str, key: &str) -> String {
    if namespace.is_empty() {
        key.to_string()
    } else {
        format!("{namespace}:{key}")
    }
}

/// Mask password in Redis URL for safe logging.
fn mask_redis_url(url: &str) -> String {
    if let Some(at_pos) = url.find('@') {
        if let Some(colon_pos) = url[..at_pos].rfind(':') {
            let scheme_end = url.find("://").map(|p| p + 3).unwrap_or(0);
            if colon_pos > scheme_end {
                return format!("{}:****@{}", &url[..colon_pos], &url[at_pos + 1..]);
            }
        }
    }
    url.to_string()
}
