//! Health check handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{CacheHealth, DetailedHealthResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/health/detailed
pub async fn health_detailed(State(state): State<AppState>) -> Json<DetailedHealthResponse> {
    let reachable = state.cache.health_check().await;

    Json(DetailedHealthResponse {
        status: if reachable { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        cache: CacheHealth {
            backend: state.cache.backend_name().to_string(),
            reachable,
        },
        planets: state.catalog.planets(),
    })
}
