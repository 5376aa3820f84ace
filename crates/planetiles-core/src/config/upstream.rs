//! Upstream imagery provider configuration.

use serde::{Deserialize, Serialize};

/// Settings for the shared upstream HTTP client and provider defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Overall deadline for one upstream request, body included.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Deadline for establishing a connection.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    /// How long idle keep-alive connections are retained.
    #[serde(default = "default_pool_idle_timeout")]
    pub pool_idle_timeout_seconds: u64,
    /// Maximum idle connections kept per upstream host.
    #[serde(default = "default_pool_max_idle")]
    pub pool_max_idle_per_host: usize,
    /// User-Agent header sent to providers.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// WMTS endpoint used for GIBS layers.
    #[serde(default = "default_gibs_base_url")]
    pub gibs_base_url: String,
    /// IIIF image server used when a layer does not name one.
    #[serde(default = "default_iiif_base_url")]
    pub iiif_base_url: String,
    /// Optional lifetime of memoized IIIF `info.json` documents.
    /// Absent means they live for the whole process.
    #[serde(default)]
    pub iiif_info_ttl_seconds: Option<u64>,
    /// Maximum number of memoized IIIF `info.json` documents.
    #[serde(default = "default_iiif_info_capacity")]
    pub iiif_info_capacity: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            request_timeout_seconds: default_request_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
            pool_idle_timeout_seconds: default_pool_idle_timeout(),
            pool_max_idle_per_host: default_pool_max_idle(),
            user_agent: default_user_agent(),
            gibs_base_url: default_gibs_base_url(),
            iiif_base_url: default_iiif_base_url(),
            iiif_info_ttl_seconds: None,
            iiif_info_capacity: default_iiif_info_capacity(),
        }
    }
}

fn default_request_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_pool_idle_timeout() -> u64 {
    90
}

fn default_pool_max_idle() -> usize {
    32
}

fn default_user_agent() -> String {
    format!("planetiles/{}", env!("CARGO_PKG_VERSION"))
}

fn default_gibs_base_url() -> String {
    "https://gibs.earthdata.nasa.gov/wmts/epsg3857/best/wmts.cgi".to_string()
}

fn default_iiif_base_url() -> String {
    "http://localhost:8182/iiif/2".to_string()
}

fn default_iiif_info_capacity() -> u64 {
    1024
}
