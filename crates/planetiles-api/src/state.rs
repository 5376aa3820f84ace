//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use planetiles_cache::CacheManager;
use planetiles_core::config::AppConfig;
use planetiles_core::traits::LayerCatalog;
use planetiles_upstream::{ProtocolRouter, UpstreamClient};

use crate::service::TileService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Planet/layer catalog
    pub catalog: Arc<dyn LayerCatalog>,
    /// Tile cache (Redis, file or disabled)
    pub cache: Arc<CacheManager>,
    /// Tile dispatch service
    pub tiles: Arc<TileService>,
}

impl AppState {
    /// Wires the tile service from its collaborators.
    pub fn new(
        config: AppConfig,
        catalog: Arc<dyn LayerCatalog>,
        cache: Arc<CacheManager>,
        protocols: Arc<ProtocolRouter>,
        upstream: UpstreamClient,
    ) -> Self {
        let tiles = Arc::new(TileService::new(
            Arc::clone(&catalog),
            Arc::clone(&cache),
            protocols,
            upstream,
            config.cache.max_entry_size_bytes,
        ));
        Self {
            config: Arc::new(config),
            catalog,
            cache,
            tiles,
        }
    }
}
