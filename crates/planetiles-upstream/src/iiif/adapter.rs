//! IIIF Image API level 2 adapter.

use std::sync::Arc;

use async_trait::async_trait;

use planetiles_core::error::AppError;
use planetiles_core::result::AppResult;
use planetiles_core::types::{IiifLayer, Protocol, TileRequest};

use crate::adapter::{UpstreamAdapter, UpstreamRequest, content_type_for};
use crate::tile_math::xyz_to_iiif_region;

use super::image_url;
use super::info_store::IiifInfoStore;

const DEFAULT_FORMAT: &str = "jpg";
const DEFAULT_SIZE: u32 = 256;

/// Maps slippy tiles onto regions of a single large IIIF image.
#[derive(Debug, Clone)]
pub struct IiifAdapter {
    info: Arc<dyn IiifInfoStore>,
    default_base_url: String,
}

impl IiifAdapter {
    pub fn new(info: Arc<dyn IiifInfoStore>, default_base_url: impl Into<String>) -> Self {
        Self {
            info,
            default_base_url: default_base_url.into(),
        }
    }

    fn base_url<'a>(&'a self, layer: &'a IiifLayer) -> &'a str {
        layer
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .unwrap_or(self.default_base_url.as_str())
    }
}

#[async_trait]
impl UpstreamAdapter for IiifAdapter {
    type Layer = IiifLayer;

    async fn build_request(
        &self,
        layer: &IiifLayer,
        tile: &TileRequest,
    ) -> AppResult<UpstreamRequest> {
        let base_url = self.base_url(layer);
        let info = self.info.get_or_fetch(base_url, &layer.identifier).await?;

        let region = xyz_to_iiif_region(tile.coord, info.width, info.height)
            .ok_or_else(|| AppError::out_of_bounds("Tile outside image bounds"))?;

        let format = layer
            .format
            .as_deref()
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .unwrap_or(DEFAULT_FORMAT);
        let size = layer.size.filter(|s| *s > 0).unwrap_or(DEFAULT_SIZE);

        let url = format!(
            "{}/{},{},{},{}/{size},/0/default.{format}",
            image_url(base_url, &layer.identifier),
            region.x,
            region.y,
            region.width,
            region.height,
        );

        Ok(UpstreamRequest {
            protocol: Protocol::Iiif,
            url,
            expected_content_type: content_type_for(format),
        })
    }
}
