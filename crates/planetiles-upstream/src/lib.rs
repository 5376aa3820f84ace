//! # planetiles-upstream
//!
//! Translates `(planet, layer, z, x, y, date?)` tile requests into requests
//! for the upstream imagery services:
//!
//! - **GIBS**: OGC WMTS `GetTile`, optionally time-dimensioned
//! - **ArcGIS**: ImageServer `exportImage` over a WGS84 bounding box
//! - **IIIF**: Image API level 2 region requests, sized from `info.json`
//!
//! [`ProtocolRouter`] picks the adapter for a layer; [`UpstreamClient`] is
//! the shared keep-alive HTTP client used for every upstream call.

pub mod adapter;
pub mod arcgis;
pub mod client;
pub mod gibs;
pub mod iiif;
pub mod router;
pub mod tile_math;

pub use adapter::{UpstreamAdapter, UpstreamRequest};
pub use client::UpstreamClient;
pub use router::ProtocolRouter;
