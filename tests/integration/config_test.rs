//! The shipped configuration files load and describe a usable catalog.

use planetiles_core::catalog::StaticCatalog;
use planetiles_core::config::AppConfig;
use planetiles_core::traits::LayerCatalog;
use planetiles_core::types::Protocol;

#[test]
fn test_default_configuration_loads() {
    let config = AppConfig::load_from("config", "production").unwrap();

    assert_eq!(config.server.port, 3001);
    assert_eq!(config.cache.namespace, "tiles");
    assert_eq!(config.logging.format, "json");

    let catalog = StaticCatalog::from_config(&config.catalog);
    assert_eq!(catalog.planets(), vec!["earth", "mars", "moon"]);

    let earth = catalog.resolve("earth", "base").unwrap();
    assert_eq!(earth.entry.config.protocol(), Protocol::Gibs);
    assert_eq!(earth.entry.max_zoom, 9);

    let mars = catalog.resolve("mars", "base").unwrap();
    assert_eq!(mars.entry.config.protocol(), Protocol::ArcgisImage);

    let moon = catalog.resolve("moon", "anything").unwrap();
    assert_eq!(moon.entry.config.protocol(), Protocol::Iiif);
    assert!(moon.fell_back);
}

#[test]
fn test_development_overlay_switches_to_pretty_logs() {
    let config = AppConfig::load_from("config", "development").unwrap();
    assert_eq!(config.logging.format, "pretty");
    assert_eq!(config.server.port, 3001);
}
