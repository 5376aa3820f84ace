//! Read-only access to the planet/layer catalog.

use crate::result::AppResult;
use crate::types::ResolvedLayer;

/// Source of layer configuration.
///
/// The catalog is owned by another part of the system; Planetiles only
/// reads from it.
pub trait LayerCatalog: Send + Sync + std::fmt::Debug + 'static {
    /// Ids of every planet the catalog knows.
    fn planets(&self) -> Vec<String>;

    /// Resolves `(planet, layer)` to a layer record.
    ///
    /// An unknown planet is a not-found error. An unknown layer on a known
    /// planet resolves to the planet's default layer instead of failing.
    fn resolve(&self, planet: &str, layer: &str) -> AppResult<ResolvedLayer>;
}
