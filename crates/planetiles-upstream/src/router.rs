//! Protocol dispatch.

use std::sync::Arc;

use planetiles_core::config::upstream::UpstreamConfig;
use planetiles_core::result::AppResult;
use planetiles_core::types::{LayerConfig, TileRequest};

use crate::adapter::{UpstreamAdapter, UpstreamRequest};
use crate::arcgis::ArcgisAdapter;
use crate::gibs::GibsAdapter;
use crate::iiif::{IiifAdapter, IiifInfoStore};

/// Holds one adapter per protocol and routes each layer to its adapter.
///
/// This is the only place that inspects which protocol a layer speaks.
#[derive(Debug, Clone)]
pub struct ProtocolRouter {
    gibs: GibsAdapter,
    arcgis: ArcgisAdapter,
    iiif: IiifAdapter,
}

impl ProtocolRouter {
    pub fn new(gibs: GibsAdapter, arcgis: ArcgisAdapter, iiif: IiifAdapter) -> Self {
        Self { gibs, arcgis, iiif }
    }

    /// Builds the router from upstream configuration.
    pub fn from_config(config: &UpstreamConfig, iiif_info: Arc<dyn IiifInfoStore>) -> Self {
        Self::new(
            GibsAdapter::new(config.gibs_base_url.clone()),
            ArcgisAdapter,
            IiifAdapter::new(iiif_info, config.iiif_base_url.clone()),
        )
    }

    /// Builds the upstream request for `tile` on `layer`.
    pub async fn build_request(
        &self,
        layer: &LayerConfig,
        tile: &TileRequest,
    ) -> AppResult<UpstreamRequest> {
        match layer {
            LayerConfig::Gibs(layer) => self.gibs.build_request(layer, tile).await,
            LayerConfig::ArcgisImage(layer) => self.arcgis.build_request(layer, tile).await,
            LayerConfig::Iiif(layer) => self.iiif.build_request(layer, tile).await,
        }
    }
}
