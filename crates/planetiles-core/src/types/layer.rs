//! Layer configuration, one variant per upstream protocol.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Upstream protocol of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Protocol {
    /// OGC WMTS `GetTile` (NASA GIBS).
    Gibs,
    /// Esri ArcGIS ImageServer `exportImage`.
    ArcgisImage,
    /// IIIF Image API level 2.
    Iiif,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gibs => write!(f, "gibs"),
            Self::ArcgisImage => write!(f, "arcgis_image"),
            Self::Iiif => write!(f, "iiif"),
        }
    }
}

/// Immutable per-layer upstream configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "protocol", rename_all = "snake_case")]
pub enum LayerConfig {
    /// WMTS time-series tiles.
    Gibs(GibsLayer),
    /// ArcGIS ImageServer dynamic exports.
    ArcgisImage(ArcgisImageLayer),
    /// IIIF Image API region requests.
    Iiif(IiifLayer),
}

impl LayerConfig {
    /// Protocol tag of this layer.
    pub fn protocol(&self) -> Protocol {
        match self {
            Self::Gibs(_) => Protocol::Gibs,
            Self::ArcgisImage(_) => Protocol::ArcgisImage,
            Self::Iiif(_) => Protocol::Iiif,
        }
    }
}

/// GIBS / WMTS layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GibsLayer {
    /// WMTS layer identifier.
    pub layer: String,
    /// WMTS tile matrix set.
    pub tile_matrix_set: String,
    /// Image format suffix, e.g. `jpeg` or `png`.
    pub format: String,
    /// Whether the layer accepts a `TIME` dimension.
    #[serde(default)]
    pub supports_time: bool,
    /// `TIME` value used when the caller supplies no date.
    #[serde(default)]
    pub default_time: Option<String>,
}

/// ArcGIS ImageServer layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArcgisImageLayer {
    /// ImageServer base URL (without `/exportImage`).
    pub endpoint: String,
    /// Output format; `png` when absent.
    #[serde(default)]
    pub format: Option<String>,
}

/// IIIF Image API layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IiifLayer {
    /// Image identifier on the IIIF server.
    pub identifier: String,
    /// Image server base URL; the configured default when absent.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Output format; `jpg` when absent.
    #[serde(default)]
    pub format: Option<String>,
    /// Output tile width in pixels; `256` when absent.
    #[serde(default)]
    pub size: Option<u32>,
}

/// Dimensions of a IIIF image, as published by its `info.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IiifInfo {
    /// Full image width in pixels.
    pub width: u64,
    /// Full image height in pixels.
    pub height: u64,
    /// Tile layouts the server advertises.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiles: Option<Vec<IiifTileSpec>>,
}

/// One entry of the `tiles` array of a IIIF `info.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IiifTileSpec {
    /// Tile width.
    pub width: u64,
    /// Tile height; equals width when absent.
    #[serde(default)]
    pub height: Option<u64>,
    /// Supported downscaling factors.
    #[serde(default)]
    pub scale_factors: Vec<u32>,
}

/// A catalog record for one layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerEntry {
    /// Protocol-specific configuration.
    #[serde(flatten)]
    pub config: LayerConfig,
    /// Display title.
    #[serde(default)]
    pub title: Option<String>,
    /// Lowest zoom the layer serves.
    #[serde(default)]
    pub min_zoom: u32,
    /// Highest zoom the layer serves.
    #[serde(default = "default_max_zoom")]
    pub max_zoom: u32,
}

impl LayerEntry {
    /// Creates an entry spanning every zoom level.
    pub fn new(config: LayerConfig) -> Self {
        Self {
            config,
            title: None,
            min_zoom: 0,
            max_zoom: default_max_zoom(),
        }
    }

    /// Restricts the entry to a zoom range.
    pub fn with_zoom_range(mut self, min_zoom: u32, max_zoom: u32) -> Self {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self
    }

    /// Whether `z` lies within the declared zoom range.
    pub fn supports_zoom(&self, z: u32) -> bool {
        (self.min_zoom..=self.max_zoom).contains(&z)
    }
}

/// The layer a request resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLayer {
    /// Planet id.
    pub planet: String,
    /// Id of the layer actually served.
    pub layer_id: String,
    /// Catalog record.
    pub entry: LayerEntry,
    /// `true` when the requested id was unknown and the default was used.
    pub fell_back: bool,
}

fn default_max_zoom() -> u32 {
    crate::types::tile::MAX_ZOOM
}
