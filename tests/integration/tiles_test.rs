//! Integration tests for the tile endpoint.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, ResponseTemplate};

const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];
const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

fn jpeg() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(JPEG.to_vec(), "image/jpeg")
}

fn info_json(width: u64, height: u64) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"width": width, "height": height}))
}

#[tokio::test]
async fn test_earth_tile_without_date_omits_time() {
    let app = helpers::TestApp::new().await;
    Mock::given(method("GET"))
        .and(path("/wmts.cgi"))
        .and(query_param("SERVICE", "WMTS"))
        .and(query_param("REQUEST", "GetTile"))
        .and(query_param("TILEMATRIX", "0"))
        .and(query_param("TILEROW", "0"))
        .and(query_param("TILECOL", "0"))
        .respond_with(jpeg())
        .expect(1)
        .mount(&app.upstream)
        .await;

    let response = app.get("/api/tiles/earth/base/0/0/0").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, JPEG);
    assert_eq!(response.header("content-type"), Some("image/jpeg"));
    assert_eq!(response.header("cache-control"), Some("public, max-age=3600"));
    assert_eq!(response.header("access-control-allow-origin"), Some("*"));
    assert_eq!(response.header("x-tile-cache"), Some("MISS"));

    let requests = app.upstream.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap_or_default().to_string();
    assert!(query.contains("TILEMATRIX=0&TILEROW=0&TILECOL=0"));
    assert!(!query.contains("TIME="));
}

#[tokio::test]
async fn test_earth_tile_with_date_sends_time() {
    let app = helpers::TestApp::new().await;
    Mock::given(method("GET"))
        .and(path("/wmts.cgi"))
        .and(query_param("TIME", "2024-03-15"))
        .respond_with(jpeg())
        .expect(1)
        .mount(&app.upstream)
        .await;

    let response = app.get("/api/tiles/earth/base/1/1/0?date=2024-03-15").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, JPEG);
}

#[tokio::test]
async fn test_mars_tile_requests_wgs84_bbox() {
    let app = helpers::TestApp::new().await;
    Mock::given(method("GET"))
        .and(path("/arcgis/rest/services/Mars/ImageServer/exportImage"))
        .and(query_param("bboxSR", "4326"))
        .and(query_param("imageSR", "4326"))
        .and(query_param("size", "256,256"))
        .and(query_param("format", "png"))
        .and(query_param("f", "image"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(PNG.to_vec(), "image/png"))
        .expect(1)
        .mount(&app.upstream)
        .await;

    let response = app.get("/api/tiles/mars/base/2/1/1").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, PNG);
    assert_eq!(response.header("content-type"), Some("image/png"));

    let requests = app.upstream.received_requests().await.unwrap();
    let bbox = requests[0]
        .url
        .query_pairs()
        .find(|(k, _)| k == "bbox")
        .map(|(_, v)| v.to_string())
        .unwrap();
    let parts: Vec<f64> = bbox.split(',').map(|p| p.parse().unwrap()).collect();
    assert_eq!(parts.len(), 4);
    assert_eq!(parts[0], -90.0);
    assert_eq!(parts[2], 0.0);
    assert!(parts[1] < parts[3]);
}

#[tokio::test]
async fn test_unknown_planet_is_not_found() {
    let app = helpers::TestApp::new().await;

    let response = app.get("/api/tiles/venus/base/0/0/0").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json(), json!({"error": "Planet venus not supported"}));
    assert!(app.upstream.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_layer_falls_back_to_default() {
    let app = helpers::TestApp::new().await;
    Mock::given(method("GET"))
        .and(path("/wmts.cgi"))
        .and(query_param(
            "LAYER",
            "MODIS_Terra_CorrectedReflectance_TrueColor",
        ))
        .respond_with(jpeg())
        .expect(1)
        .mount(&app.upstream)
        .await;

    let response = app.get("/api/tiles/earth/does-not-exist/0/0/0").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, JPEG);
}

#[tokio::test]
async fn test_iiif_tile_maps_to_image_region() {
    let app = helpers::TestApp::new().await;
    Mock::given(method("GET"))
        .and(path("/iiif/2/moon/info.json"))
        .respond_with(info_json(1000, 500))
        .expect(1)
        .mount(&app.upstream)
        .await;
    Mock::given(method("GET"))
        .and(path("/iiif/2/moon/500,0,500,250/256,/0/default.jpg"))
        .respond_with(jpeg())
        .expect(1)
        .mount(&app.upstream)
        .await;

    let response = app.get("/api/tiles/moon/base/1/1/0").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, JPEG);
}

#[tokio::test]
async fn test_iiif_tile_outside_image_is_not_found() {
    let app = helpers::TestApp::new().await;
    Mock::given(method("GET"))
        .and(path("/iiif/2/moon/info.json"))
        .respond_with(info_json(100, 100))
        .expect(1)
        .mount(&app.upstream)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/iiif/2/moon/\d+,\d+,\d+,\d+/"))
        .respond_with(jpeg())
        .expect(0)
        .mount(&app.upstream)
        .await;

    let response = app.get("/api/tiles/moon/base/8/200/0").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.json()["error"].is_string());
}

#[tokio::test]
async fn test_iiif_tile_past_grid_is_not_found() {
    let app = helpers::TestApp::new().await;
    Mock::given(method("GET"))
        .and(path("/iiif/2/moon/info.json"))
        .respond_with(info_json(100, 100))
        .mount(&app.upstream)
        .await;

    let response = app.get("/api/tiles/moon/base/0/1/0").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.json()["error"].is_string());
    let requests = app.upstream.received_requests().await.unwrap();
    assert!(requests.iter().all(|r| r.url.path().ends_with("/info.json")));
}

#[tokio::test]
async fn test_earth_tile_past_grid_is_not_found() {
    let app = helpers::TestApp::new().await;

    for uri in ["/api/tiles/earth/base/1/2/0", "/api/tiles/earth/base/1/0/2"] {
        let response = app.get(uri).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(
            response.json(),
            json!({"error": "Tile outside the tile grid"}),
            "{uri}"
        );
    }
    assert!(app.upstream.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_second_request_is_served_from_cache() {
    let app = helpers::TestApp::new().await;
    Mock::given(method("GET"))
        .and(path("/wmts.cgi"))
        .respond_with(jpeg())
        .expect(1)
        .mount(&app.upstream)
        .await;

    let first = app.get("/api/tiles/earth/base/1/0/0").await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.header("x-tile-cache"), Some("MISS"));

    let cached = app.wait_for_cache("earth/base/1/0/0").await.unwrap();
    assert_eq!(cached.bytes().as_ref(), JPEG);

    let second = app.get("/api/tiles/earth/base/1/0/0").await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.header("x-tile-cache"), Some("HIT"));
    assert_eq!(second.body, JPEG);
    assert_eq!(second.header("content-type"), Some("image/jpeg"));
    assert_eq!(second.header("cache-control"), Some("public, max-age=3600"));
    assert_eq!(second.header("access-control-allow-origin"), Some("*"));
}

#[tokio::test]
async fn test_fallback_layer_shares_cache_with_default() {
    let app = helpers::TestApp::new().await;
    Mock::given(method("GET"))
        .and(path("/wmts.cgi"))
        .respond_with(jpeg())
        .expect(1)
        .mount(&app.upstream)
        .await;

    app.get("/api/tiles/earth/base/2/3/1").await;
    app.wait_for_cache("earth/base/2/3/1").await.unwrap();

    let response = app.get("/api/tiles/earth/unknown/2/3/1").await;
    assert_eq!(response.header("x-tile-cache"), Some("HIT"));
}

#[tokio::test]
async fn test_upstream_error_status_is_mirrored_without_body() {
    let app = helpers::TestApp::new().await;
    Mock::given(method("GET"))
        .and(path("/wmts.cgi"))
        .respond_with(ResponseTemplate::new(503).set_body_string("secret maintenance notice"))
        .mount(&app.upstream)
        .await;

    let response = app.get("/api/tiles/earth/base/0/0/0").await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        response.json(),
        json!({"error": "Upstream tile provider returned an error"})
    );
    assert!(!String::from_utf8_lossy(&response.body).contains("secret"));
    assert!(app.state.cache.get("earth/base/0/0/0").await.is_none());
}

#[tokio::test]
async fn test_unreachable_upstream_is_internal_error() {
    let app = helpers::TestApp::with_config(|config| {
        config.upstream.gibs_base_url = "http://127.0.0.1:1/wmts.cgi".to_string();
    })
    .await;

    let response = app.get("/api/tiles/earth/base/0/0/0").await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json(),
        json!({"error": "Failed to reach upstream tile provider"})
    );
}

#[tokio::test]
async fn test_invalid_date_is_bad_request() {
    let app = helpers::TestApp::new().await;

    let response = app.get("/api/tiles/earth/base/0/0/0?date=2024-13-45").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json(), json!({"error": "Invalid date supplied"}));
}

#[tokio::test]
async fn test_invalid_coordinates_are_bad_request() {
    let app = helpers::TestApp::new().await;

    for uri in [
        "/api/tiles/earth/base/abc/0/0",
        "/api/tiles/earth/base/1/0.5/0",
        "/api/tiles/earth/base/1/-1/0",
    ] {
        let response = app.get(uri).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(
            response.json(),
            json!({"error": "Invalid tile coordinates supplied"}),
            "{uri}"
        );
    }
    assert!(app.upstream.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_zoom_beyond_layer_range_is_bad_request() {
    let app = helpers::TestApp::new().await;

    let response = app.get("/api/tiles/earth/base/10/0/0").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json(),
        json!({"error": "Zoom level 10 is outside the supported range for layer base"})
    );
}

#[tokio::test]
async fn test_disabled_cache_always_fetches() {
    let app = helpers::TestApp::with_config(|config| config.cache.enabled = false).await;
    Mock::given(method("GET"))
        .and(path("/wmts.cgi"))
        .respond_with(jpeg())
        .expect(2)
        .mount(&app.upstream)
        .await;

    for _ in 0..2 {
        let response = app.get("/api/tiles/earth/base/0/0/0").await;
        assert_eq!(response.header("x-tile-cache"), Some("MISS"));
    }
}
