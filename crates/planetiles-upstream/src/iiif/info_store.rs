//! Memoized IIIF `info.json` lookups.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use tracing::{debug, warn};

use planetiles_core::config::upstream::UpstreamConfig;
use planetiles_core::error::AppError;
use planetiles_core::result::AppResult;
use planetiles_core::types::IiifInfo;

use crate::client::UpstreamClient;

use super::image_url;

/// Source of image dimensions for IIIF layers.
#[async_trait]
pub trait IiifInfoStore: Send + Sync + std::fmt::Debug {
    /// Returns the `info.json` of `identifier` on `base_url`, fetching it on
    /// first use.
    async fn get_or_fetch(&self, base_url: &str, identifier: &str) -> AppResult<Arc<IiifInfo>>;
}

/// In-process `info.json` memo.
///
/// Concurrent first requests for the same image share one fetch. Failed
/// fetches are not remembered, so the next request tries again.
#[derive(Debug, Clone)]
pub struct MemoryIiifInfoStore {
    cache: Cache<String, Arc<IiifInfo>>,
    client: UpstreamClient,
}

impl MemoryIiifInfoStore {
    pub fn new(client: UpstreamClient, capacity: u64, ttl: Option<Duration>) -> Self {
        let mut builder = Cache::builder().max_capacity(capacity);
        if let Some(ttl) = ttl {
            builder = builder.time_to_live(ttl);
        }
        Self {
            cache: builder.build(),
            client,
        }
    }

    pub fn from_config(client: UpstreamClient, config: &UpstreamConfig) -> Self {
        Self::new(
            client,
            config.iiif_info_capacity,
            config.iiif_info_ttl_seconds.map(Duration::from_secs),
        )
    }

    async fn fetch(&self, image: &str) -> AppResult<Arc<IiifInfo>> {
        let url = format!("{image}/info.json");
        debug!(url = %url, "Fetching IIIF info.json");

        let info: IiifInfo = self.client.get_json(&url).await?;
        if info.width == 0 || info.height == 0 {
            warn!(url = %url, width = info.width, height = info.height, "IIIF image has no area");
            return Err(AppError::upstream(
                502,
                "IIIF info.json reports an empty image",
            ));
        }
        Ok(Arc::new(info))
    }
}

#[async_trait]
impl IiifInfoStore for MemoryIiifInfoStore {
    async fn get_or_fetch(&self, base_url: &str, identifier: &str) -> AppResult<Arc<IiifInfo>> {
        let image = image_url(base_url, identifier);
        self.cache
            .try_get_with(image.clone(), self.fetch(&image))
            .await
            .map_err(|e| (*e).clone())
    }
}
