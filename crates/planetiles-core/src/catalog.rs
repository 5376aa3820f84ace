//! Configuration-backed layer catalog.

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::catalog::{CatalogConfig, PlanetCatalog};
use crate::error::AppError;
use crate::result::AppResult;
use crate::traits::LayerCatalog;
use crate::types::{LayerEntry, ResolvedLayer};

/// A catalog held in memory, usually built from the `[catalog]` section of
/// the configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    planets: BTreeMap<String, PlanetCatalog>,
}

impl StaticCatalog {
    /// Builds a catalog from configuration.
    pub fn from_config(config: &CatalogConfig) -> Self {
        let planets = config
            .planets
            .iter()
            .map(|(id, planet)| (id.to_lowercase(), planet.clone()))
            .collect();
        Self { planets }
    }

    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a layer, creating the planet if needed. The first layer added
    /// to a planet becomes its default.
    pub fn with_layer(mut self, planet: &str, layer_id: &str, entry: LayerEntry) -> Self {
        let planet = self.planets.entry(planet.to_lowercase()).or_default();
        if planet.default_layer.is_none() {
            planet.default_layer = Some(layer_id.to_string());
        }
        planet.layers.insert(layer_id.to_string(), entry);
        self
    }

    /// Overrides the default layer of a planet.
    pub fn with_default_layer(mut self, planet: &str, layer_id: &str) -> Self {
        self.planets
            .entry(planet.to_lowercase())
            .or_default()
            .default_layer = Some(layer_id.to_string());
        self
    }

    fn default_layer<'a>(planet: &'a PlanetCatalog) -> Option<(&'a String, &'a LayerEntry)> {
        planet
            .default_layer
            .as_ref()
            .and_then(|id| planet.layers.get_key_value(id))
            .or_else(|| planet.layers.iter().next())
    }
}

impl LayerCatalog for StaticCatalog {
    fn planets(&self) -> Vec<String> {
        self.planets.keys().cloned().collect()
    }

    fn resolve(&self, planet_id: &str, layer_id: &str) -> AppResult<ResolvedLayer> {
        let planet_key = planet_id.to_lowercase();
        let unsupported = || AppError::not_found(format!("Planet {planet_id} not supported"));

        let planet = self.planets.get(&planet_key).ok_or_else(unsupported)?;

        if let Some(entry) = planet.layers.get(layer_id) {
            return Ok(ResolvedLayer {
                planet: planet_key,
                layer_id: layer_id.to_string(),
                entry: entry.clone(),
                fell_back: false,
            });
        }

        let (default_id, entry) = Self::default_layer(planet).ok_or_else(unsupported)?;
        debug!(
            planet = %planet_key,
            requested = layer_id,
            fallback = %default_id,
            "Unknown layer, serving planet default"
        );
        Ok(ResolvedLayer {
            planet: planet_key,
            layer_id: default_id.clone(),
            entry: entry.clone(),
            fell_back: true,
        })
    }
}
