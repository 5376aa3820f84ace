//! Tile dispatch service.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::body::Body;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, warn};

use planetiles_cache::{CacheManager, keys};
use planetiles_core::error::AppError;
use planetiles_core::result::AppResult;
use planetiles_core::traits::LayerCatalog;
use planetiles_core::types::{CacheEntry, ResolvedLayer, TileCoord, TileRequest};
use planetiles_upstream::client::error_snippet;
use planetiles_upstream::{ProtocolRouter, UpstreamClient};

use crate::dto::request::{TilePath, TileQuery};

use super::tee::{CacheSink, CacheTee};

/// `Cache-Control` sent with every tile.
pub const TILE_CACHE_CONTROL: &str = "public, max-age=3600";

/// A tile ready to be sent to the client.
#[derive(Debug)]
pub enum TileOutcome {
    /// Served from the cache.
    Hit(CacheEntry),
    /// Streamed from the upstream provider.
    Miss {
        /// Upstream content type, or the protocol default.
        content_type: String,
        /// Upstream body, teed into the cache.
        body: Body,
    },
}

/// Resolves, validates, and serves tile requests.
#[derive(Debug, Clone)]
pub struct TileService {
    catalog: Arc<dyn LayerCatalog>,
    cache: Arc<CacheManager>,
    protocols: Arc<ProtocolRouter>,
    upstream: UpstreamClient,
    max_cached_bytes: usize,
}

impl TileService {
    pub fn new(
        catalog: Arc<dyn LayerCatalog>,
        cache: Arc<CacheManager>,
        protocols: Arc<ProtocolRouter>,
        upstream: UpstreamClient,
        max_cached_bytes: u64,
    ) -> Self {
        Self {
            catalog,
            cache,
            protocols,
            upstream,
            max_cached_bytes: usize::try_from(max_cached_bytes).unwrap_or(usize::MAX),
        }
    }

    /// Turns raw path and query input into a validated request against the
    /// resolved layer.
    pub fn resolve(
        &self,
        path: &TilePath,
        query: &TileQuery,
    ) -> AppResult<(TileRequest, ResolvedLayer)> {
        let resolved = self.catalog.resolve(&path.planet, &path.layer)?;
        let coord = TileCoord::parse(&path.z, &path.x, &path.y)?;
        let date = query.date()?;

        if !resolved.entry.supports_zoom(coord.z) {
            return Err(AppError::validation(format!(
                "Zoom level {} is outside the supported range for layer {}",
                coord.z, resolved.layer_id
            )));
        }

        let request = TileRequest {
            planet: resolved.planet.clone(),
            layer: resolved.layer_id.clone(),
            coord,
            date,
        };
        Ok((request, resolved))
    }

    /// Serves one tile, from the cache when possible.
    pub async fn fetch(&self, path: &TilePath, query: &TileQuery) -> AppResult<TileOutcome> {
        let (tile, resolved) = self.resolve(path, query)?;
        let key = keys::tile(&tile);

        if let Some(entry) = self.cache.get(&key).await {
            debug!(key = %key, "Tile cache hit");
            return Ok(TileOutcome::Hit(entry));
        }

        let request = self
            .protocols
            .build_request(&resolved.entry.config, &tile)
            .await?;
        debug!(
            key = %key,
            protocol = %request.protocol,
            url = %request.url,
            "Fetching tile from upstream"
        );

        let response = self.upstream.get(&request.url).await?;
        let status = response.status();
        if !status.is_success() {
            let snippet = error_snippet(response).await;
            warn!(
                url = %request.url,
                status = status.as_u16(),
                body = %snippet,
                "Upstream tile provider returned an error"
            );
            return Err(AppError::upstream(
                status.as_u16(),
                format!("Upstream returned HTTP {}", status.as_u16()),
            ));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .unwrap_or(request.expected_content_type);

        let sink = CacheSink::new(
            Arc::clone(&self.cache),
            key,
            content_type.clone(),
            status.as_u16(),
            stored_headers(),
        );
        let body = Body::from_stream(CacheTee::new(
            response.bytes_stream(),
            sink,
            self.max_cached_bytes,
        ));

        Ok(TileOutcome::Miss { content_type, body })
    }
}

/// Headers persisted alongside cached tiles and replayed on hits.
fn stored_headers() -> BTreeMap<String, String> {
    BTreeMap::from([("cache-control".to_string(), TILE_CACHE_CONTROL.to_string())])
}
