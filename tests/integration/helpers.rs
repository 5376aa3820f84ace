//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;
use wiremock::MockServer;

use planetiles_api::{AppState, build_app, build_state};
use planetiles_core::config::AppConfig;
use planetiles_core::config::catalog::CatalogConfig;
use planetiles_core::types::CacheEntry;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application state, for direct cache inspection
    pub state: AppState,
    /// Stand-in for every upstream provider
    pub upstream: MockServer,
    /// Keeps the file cache directory alive for the test's duration
    _cache_dir: TempDir,
}

impl TestApp {
    /// Create a test application with a file cache and the test catalog.
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Create a test application, letting the caller adjust the config
    /// after the defaults are applied.
    pub async fn with_config(adjust: impl FnOnce(&mut AppConfig)) -> Self {
        let upstream = MockServer::start().await;
        let cache_dir = tempfile::tempdir().expect("Failed to create cache dir");

        let mut config = AppConfig::default();
        config.cache.directory = cache_dir.path().to_string_lossy().to_string();
        config.upstream.request_timeout_seconds = 5;
        config.upstream.connect_timeout_seconds = 2;
        config.upstream.gibs_base_url = format!("{}/wmts.cgi", upstream.uri());
        config.upstream.iiif_base_url = format!("{}/iiif/2", upstream.uri());
        config.catalog = test_catalog(&upstream.uri());
        adjust(&mut config);

        let state = build_state(config).await.expect("Failed to build state");
        let router = build_app(state.clone());

        Self {
            router,
            state,
            upstream,
            _cache_dir: cache_dir,
        }
    }

    /// Issue a GET against the router.
    pub async fn get(&self, path: &str) -> TestResponse {
        let req = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .expect("Failed to read body")
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Poll the cache until the background write-back for `key` lands.
    pub async fn wait_for_cache(&self, key: &str) -> Option<CacheEntry> {
        for _ in 0..100 {
            if let Some(entry) = self.state.cache.get(key).await {
                return Some(entry);
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        None
    }
}

/// Catalog used by every test: GIBS earth, ArcGIS mars, IIIF moon.
pub fn test_catalog(upstream: &str) -> CatalogConfig {
    serde_json::from_value(serde_json::json!({
        "planets": {
            "earth": {
                "default_layer": "base",
                "layers": {
                    "base": {
                        "protocol": "gibs",
                        "layer": "MODIS_Terra_CorrectedReflectance_TrueColor",
                        "tile_matrix_set": "GoogleMapsCompatible_Level9",
                        "format": "jpeg",
                        "supports_time": true,
                        "max_zoom": 9
                    }
                }
            },
            "mars": {
                "layers": {
                    "base": {
                        "protocol": "arcgis_image",
                        "endpoint": format!("{upstream}/arcgis/rest/services/Mars/ImageServer")
                    }
                }
            },
            "moon": {
                "layers": {
                    "base": {
                        "protocol": "iiif",
                        "identifier": "moon"
                    }
                }
            }
        }
    }))
    .expect("Invalid test catalog")
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw body
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Body parsed as JSON, or `Null` when it is not JSON.
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }

    /// A header value as a string.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
