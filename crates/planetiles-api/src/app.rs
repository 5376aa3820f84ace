//! Application builder: wires configuration into state, router and server.

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::sync::watch;

use planetiles_cache::CacheManager;
use planetiles_core::catalog::StaticCatalog;
use planetiles_core::config::AppConfig;
use planetiles_core::error::AppError;
use planetiles_core::result::AppResult;
use planetiles_core::traits::LayerCatalog;
use planetiles_upstream::iiif::MemoryIiifInfoStore;
use planetiles_upstream::{ProtocolRouter, UpstreamClient};

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Composes every dependency described by `config`.
pub async fn build_state(config: AppConfig) -> AppResult<AppState> {
    let catalog: Arc<dyn LayerCatalog> = Arc::new(StaticCatalog::from_config(&config.catalog));
    let planets = catalog.planets();
    if planets.is_empty() {
        tracing::warn!("Catalog is empty, every tile request will return 404");
    } else {
        tracing::info!(planets = ?planets, "Catalog loaded");
    }

    let cache = Arc::new(CacheManager::new(&config.cache).await);
    tracing::info!(backend = cache.backend_name(), "Tile cache ready");

    let upstream = UpstreamClient::new(&config.upstream)?;
    let iiif_info = Arc::new(MemoryIiifInfoStore::from_config(
        upstream.clone(),
        &config.upstream,
    ));
    let protocols = Arc::new(ProtocolRouter::from_config(&config.upstream, iiif_info));

    Ok(AppState::new(config, catalog, cache, protocols, upstream))
}

/// Runs the Planetiles server until Ctrl+C or SIGTERM.
pub async fn run_server(config: AppConfig) -> AppResult<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);

    let state = build_state(config).await?;
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
    tracing::info!("Planetiles server listening on {}", addr);

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, draining connections...");
            let _ = shutdown_tx.send(true);
        })
        .into_future();

    let grace_elapsed = async move {
        if shutdown_rx.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
        tokio::time::sleep(grace).await;
    };

    tokio::select! {
        result = server => {
            result.map_err(|e| AppError::internal(format!("Server error: {e}")))?;
        }
        _ = grace_elapsed => {
            tracing::warn!(
                grace_seconds = grace.as_secs(),
                "Shutdown grace period elapsed, dropping open connections"
            );
        }
    }

    tracing::info!("Planetiles server shut down");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
