//! Filesystem cache backend.
//!
//! Keys are SHA-1 hashed and sharded two levels deep:
//! `root/AA/BB/<hash>.bin` holds the body and `root/AA/BB/<hash>.json` the
//! [`FileCacheMetadata`] sidecar.

use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use sha1::{Digest, Sha1};
use tokio::fs;
use tracing::{debug, warn};
use uuid::Uuid;

use planetiles_core::error::{AppError, ErrorKind};
use planetiles_core::result::AppResult;
use planetiles_core::traits::CacheBackend;
use planetiles_core::types::CacheEntry;

use super::metadata::FileCacheMetadata;

/// On-disk locations of one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPaths {
    /// Body file.
    pub data: PathBuf,
    /// Metadata sidecar.
    pub meta: PathBuf,
}

/// Filesystem cache backend.
#[derive(Debug, Clone)]
pub struct FileCacheBackend {
    /// Root directory (already including the namespace).
    root: PathBuf,
    /// Entries larger than this are silently skipped.
    max_entry_size_bytes: u64,
}

impl FileCacheBackend {
    /// Create a backend rooted at `directory/namespace`, creating it if
    /// needed.
    pub async fn new(
        directory: &str,
        namespace: &str,
        max_entry_size_bytes: u64,
    ) -> AppResult<Self> {
        let mut root = PathBuf::from(directory);
        if !namespace.is_empty() {
            root.push(namespace);
        }
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Cache,
                format!("Failed to create cache root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self {
            root,
            max_entry_size_bytes,
        })
    }

    /// Root directory of this backend.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve the sharded paths for a key.
    pub fn paths(&self, key: &str) -> EntryPaths {
        let hash = hex::encode(Sha1::digest(key.as_bytes()));
        let dir = self.root.join(&hash[0..2]).join(&hash[2..4]);
        EntryPaths {
            data: dir.join(format!("{hash}.bin")),
            meta: dir.join(format!("{hash}.json")),
        }
    }

    async fn remove_entry(&self, paths: &EntryPaths) -> AppResult<()> {
        let (data, meta) = tokio::join!(
            remove_if_exists(&paths.data),
            remove_if_exists(&paths.meta)
        );
        data?;
        meta?;
        Ok(())
    }
}

#[async_trait]
impl CacheBackend for FileCacheBackend {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn get(&self, key: &str) -> AppResult<Option<CacheEntry>> {
        let paths = self.paths(key);

        let raw_meta = match fs::read(&paths.meta).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == IoErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(cache_io_error("Failed to read cache metadata", e)),
        };

        let meta: FileCacheMetadata = match serde_json::from_slice(&raw_meta) {
            Ok(meta) => meta,
            Err(e) => {
                warn!(key, error = %e, "Discarding unreadable cache metadata");
                self.remove_entry(&paths).await?;
                return Ok(None);
            }
        };

        if meta.is_expired(now_ms()) {
            debug!(key, "Cache entry expired");
            self.remove_entry(&paths).await?;
            return Ok(None);
        }

        let bytes = match fs::read(&paths.data).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == IoErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(cache_io_error("Failed to read cached body", e)),
        };

        let entry = CacheEntry::new(bytes, meta.content_type, meta.status)
            .with_headers(meta.headers.unwrap_or_default());
        Ok(Some(entry))
    }

    async fn set(&self, key: &str, entry: &CacheEntry, ttl: Duration) -> AppResult<()> {
        if entry.len() as u64 > self.max_entry_size_bytes {
            debug!(
                key,
                bytes = entry.len(),
                limit = self.max_entry_size_bytes,
                "Entry exceeds max cache size, not caching"
            );
            return Ok(());
        }

        let paths = self.paths(key);
        if let Some(parent) = paths.data.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| cache_io_error("Failed to create cache shard", e))?;
        }

        let meta = FileCacheMetadata {
            content_type: entry.content_type().to_string(),
            status: entry.status(),
            headers: entry.headers().cloned(),
            expires_at: now_ms().saturating_add(ttl_ms(ttl)),
        };
        let meta_json = serde_json::to_vec(&meta)?;

        let (data, meta) = tokio::join!(
            write_replace(&paths.data, entry.bytes()),
            write_replace(&paths.meta, &meta_json)
        );
        data?;
        meta?;

        debug!(key, bytes = entry.len(), "Wrote cache entry");
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let paths = self.paths(key);
        self.remove_entry(&paths).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(fs::metadata(&self.root)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false))
    }
}

/// Write to a temporary sibling and rename it over `path`, so readers never
/// see a partially written file.
async fn write_replace(path: &Path, contents: &[u8]) -> AppResult<()> {
    let tmp = path.with_extension(format!("{}.tmp", Uuid::new_v4().simple()));
    if let Err(e) = fs::write(&tmp, contents).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(cache_io_error("Failed to write cache file", e));
    }
    if let Err(e) = fs::rename(&tmp, path).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(cache_io_error("Failed to move cache file into place", e));
    }
    Ok(())
}

async fn remove_if_exists(path: &Path) -> AppResult<()> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == IoErrorKind::NotFound => Ok(()),
        Err(e) => Err(cache_io_error("Failed to remove cache file", e)),
    }
}

fn cache_io_error(message: &str, e: std::io::Error) -> AppError {
    AppError::with_source(ErrorKind::Cache, format!("{message}: {e}"), e)
}

fn ttl_ms(ttl: Duration) -> i64 {
    i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX)
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
