//! Esri ArcGIS ImageServer adapter (`exportImage`).

use async_trait::async_trait;

use planetiles_core::result::AppResult;
use planetiles_core::types::{ArcgisImageLayer, Protocol, TileRequest};

use crate::adapter::{UpstreamAdapter, UpstreamRequest, content_type_for};
use crate::tile_math::tile_to_bbox_4326;

const DEFAULT_FORMAT: &str = "png";
const TILE_SIZE: u32 = 256;

/// Requests each tile as a 256x256 export of its WGS84 bounding box.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArcgisAdapter;

impl ArcgisAdapter {
    pub fn tile_url(&self, layer: &ArcgisImageLayer, tile: &TileRequest) -> String {
        let bbox = tile_to_bbox_4326(tile.coord);
        format!(
            "{}/exportImage?bbox={}&bboxSR=4326&imageSR=4326&size={TILE_SIZE},{TILE_SIZE}\
             &format={}&transparent=true&f=image",
            layer.endpoint.trim_end_matches('/'),
            bbox.to_query_value(),
            urlencoding::encode(format_of(layer)),
        )
    }
}

fn format_of(layer: &ArcgisImageLayer) -> &str {
    layer
        .format
        .as_deref()
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .unwrap_or(DEFAULT_FORMAT)
}

#[async_trait]
impl UpstreamAdapter for ArcgisAdapter {
    type Layer = ArcgisImageLayer;

    async fn build_request(
        &self,
        layer: &ArcgisImageLayer,
        tile: &TileRequest,
    ) -> AppResult<UpstreamRequest> {
        Ok(UpstreamRequest {
            protocol: Protocol::ArcgisImage,
            url: self.tile_url(layer, tile),
            expected_content_type: content_type_for(format_of(layer)),
        })
    }
}
