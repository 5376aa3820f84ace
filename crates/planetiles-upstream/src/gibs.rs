//! NASA GIBS adapter (OGC WMTS `GetTile`, KVP encoding).

use async_trait::async_trait;

use planetiles_core::result::AppResult;
use planetiles_core::types::{GibsLayer, Protocol, TileRequest};

use crate::adapter::{UpstreamAdapter, UpstreamRequest, content_type_for, with_query};

/// Builds WMTS `GetTile` URLs against one endpoint.
#[derive(Debug, Clone)]
pub struct GibsAdapter {
    base_url: String,
}

impl GibsAdapter {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// `TIME` value for a request: the caller's date wins over the layer
    /// default, and layers without a time dimension never get one.
    fn time_for(layer: &GibsLayer, tile: &TileRequest) -> Option<String> {
        if !layer.supports_time {
            return None;
        }
        tile.date_string().or_else(|| {
            layer
                .default_time
                .as_ref()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
        })
    }

    pub fn tile_url(&self, layer: &GibsLayer, tile: &TileRequest) -> String {
        let coord = tile.coord;
        let mut query = format!(
            "SERVICE=WMTS&REQUEST=GetTile&VERSION=1.0.0&LAYER={}&TILEMATRIXSET={}\
             &TILEMATRIX={}&TILEROW={}&TILECOL={}&FORMAT=image/{}",
            urlencoding::encode(&layer.layer),
            urlencoding::encode(&layer.tile_matrix_set),
            coord.z,
            coord.y,
            coord.x,
            layer.format,
        );
        if let Some(time) = Self::time_for(layer, tile) {
            query.push_str("&TIME=");
            query.push_str(&urlencoding::encode(&time));
        }
        with_query(&self.base_url, &query)
    }
}

#[async_trait]
impl UpstreamAdapter for GibsAdapter {
    type Layer = GibsLayer;

    async fn build_request(
        &self,
        layer: &GibsLayer,
        tile: &TileRequest,
    ) -> AppResult<UpstreamRequest> {
        Ok(UpstreamRequest {
            protocol: Protocol::Gibs,
            url: self.tile_url(layer, tile),
            expected_content_type: content_type_for(&layer.format),
        })
    }
}
