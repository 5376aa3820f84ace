//! Sidecar metadata stored next to each cached body.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Contents of the `<hash>.json` sidecar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileCacheMetadata {
    /// MIME type of the body.
    pub content_type: String,
    /// HTTP status the body was served with.
    pub status: u16,
    /// Extra headers replayed on a hit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    /// Expiry as milliseconds since the Unix epoch.
    pub expires_at: i64,
}

impl FileCacheMetadata {
    /// Whether the entry has expired at `now_ms`.
    pub fn is_expired(&self, now_ms: i64) -> bool {
        self.expires_at <= now_ms
    }
}
