//! Planet/layer catalog configuration.
//!
//! The catalog content is authored elsewhere; this section only describes
//! how it is laid out when it is supplied through the configuration files:
//!
//! ```toml
//! [catalog.planets.earth]
//! default_layer = "base"
//!
//! [catalog.planets.earth.layers.base]
//! protocol = "gibs"
//! layer = "BlueMarble_ShadedRelief_Bathymetry"
//! tile_matrix_set = "GoogleMapsCompatible_Level8"
//! format = "jpeg"
//! supports_time = false
//! max_zoom = 8
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::layer::LayerEntry;

/// Catalog of every planet the proxy serves.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Planets keyed by lowercase id (`earth`, `mars`, `moon`, ...).
    #[serde(default)]
    pub planets: BTreeMap<String, PlanetCatalog>,
}

/// Layers available for one planet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanetCatalog {
    /// Layer served when the requested layer id is unknown.
    #[serde(default)]
    pub default_layer: Option<String>,
    /// Layers keyed by id.
    #[serde(default)]
    pub layers: BTreeMap<String, LayerEntry>,
}
