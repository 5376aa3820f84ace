//! The adapter seam shared by every upstream protocol.

use async_trait::async_trait;

use planetiles_core::result::AppResult;
use planetiles_core::types::{Protocol, TileRequest};

/// A fully formed upstream call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamRequest {
    /// Protocol that produced the request.
    pub protocol: Protocol,
    /// Absolute URL to GET.
    pub url: String,
    /// Content type to assume when the provider sends none.
    pub expected_content_type: String,
}

/// Translates a tile request into an upstream request for one protocol.
#[async_trait]
pub trait UpstreamAdapter: Send + Sync + std::fmt::Debug {
    /// Protocol-specific layer configuration.
    type Layer: Send + Sync;

    /// Build the upstream request for `tile` on `layer`.
    async fn build_request(&self, layer: &Self::Layer, tile: &TileRequest)
    -> AppResult<UpstreamRequest>;
}

/// Maps an image format name to its MIME type.
pub fn content_type_for(format: &str) -> String {
    match format.trim().to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" | "jpgpng" => "image/jpeg".to_string(),
        "png" | "png8" | "png24" | "png32" => "image/png".to_string(),
        "webp" => "image/webp".to_string(),
        "gif" => "image/gif".to_string(),
        "tif" | "tiff" => "image/tiff".to_string(),
        other => format!("image/{other}"),
    }
}

/// Appends a query string to a base URL that may already carry one.
pub(crate) fn with_query(base: &str, query: &str) -> String {
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{base}{separator}{query}")
}
