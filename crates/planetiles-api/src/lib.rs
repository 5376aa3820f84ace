//! # planetiles-api
//!
//! HTTP API layer for Planetiles built on Axum.
//!
//! Provides the tile and health endpoints, middleware (CORS, request
//! logging), DTOs, error mapping, and the tile dispatch service that ties
//! the catalog, the cache and the upstream adapters together.

pub mod app;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod service;
pub mod state;

pub use app::{build_app, build_state, run_server};
pub use error::ApiError;
pub use state::AppState;
