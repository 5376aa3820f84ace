//! Tile handler.

use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderName, HeaderValue, StatusCode, header};
use axum::response::Response;

use planetiles_core::error::AppError;
use planetiles_core::types::CacheEntry;

use crate::dto::request::{TilePath, TileQuery};
use crate::error::ApiError;
use crate::service::TileOutcome;
use crate::service::tile::TILE_CACHE_CONTROL;
use crate::state::AppState;

/// Reports whether a tile came from the cache.
pub const X_TILE_CACHE: &str = "x-tile-cache";

/// GET /api/tiles/{planet}/{layer}/{z}/{x}/{y}?date=YYYY-MM-DD
pub async fn get_tile(
    State(state): State<AppState>,
    Path(path): Path<TilePath>,
    Query(query): Query<TileQuery>,
) -> Result<Response, ApiError> {
    match state.tiles.fetch(&path, &query).await? {
        TileOutcome::Hit(entry) => cached_response(entry),
        TileOutcome::Miss { content_type, body } => Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, content_type)
            .header(header::CACHE_CONTROL, TILE_CACHE_CONTROL)
            .header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")
            .header(X_TILE_CACHE, "MISS")
            .body(body)
            .map_err(build_failed),
    }
}

/// Replays a cached tile with the headers stored alongside it.
fn cached_response(entry: CacheEntry) -> Result<Response, ApiError> {
    let status = StatusCode::from_u16(entry.status()).unwrap_or(StatusCode::OK);
    let mut response = Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, entry.content_type())
        .body(Body::from(entry.bytes().clone()))
        .map_err(build_failed)?;

    let headers = response.headers_mut();
    for (name, value) in entry.headers().into_iter().flatten() {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            headers.insert(name, value);
        }
    }
    headers
        .entry(header::CACHE_CONTROL)
        .or_insert(HeaderValue::from_static(TILE_CACHE_CONTROL));
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        HeaderName::from_static(X_TILE_CACHE),
        HeaderValue::from_static("HIT"),
    );

    Ok(response)
}

fn build_failed(e: axum::http::Error) -> ApiError {
    AppError::internal(format!("Response build failed: {e}")).into()
}
