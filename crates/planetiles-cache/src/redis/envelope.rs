//! JSON envelope used to store binary tiles in Redis.
//!
//! Redis expiry is handled with `EX`, so the envelope carries no
//! `expiresAt`.

use std::collections::BTreeMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use planetiles_core::error::{AppError, ErrorKind};
use planetiles_core::result::AppResult;
use planetiles_core::types::CacheEntry;

/// Stored representation of a [`CacheEntry`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedisEnvelope {
    /// Base64 (standard alphabet, padded) body.
    pub data: String,
    /// MIME type of the body.
    pub content_type: String,
    /// HTTP status.
    pub status: u16,
    /// Extra headers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
}

/// Serialize an entry to its envelope JSON.
pub fn encode_entry(entry: &CacheEntry) -> AppResult<String> {
    let envelope = RedisEnvelope {
        data: STANDARD.encode(entry.bytes()),
        content_type: entry.content_type().to_string(),
        status: entry.status(),
        headers: entry.headers().cloned(),
    };
    Ok(serde_json::to_string(&envelope)?)
}

/// Parse envelope JSON back into an entry.
pub fn decode_entry(raw: &str) -> AppResult<CacheEntry> {
    let envelope: RedisEnvelope = serde_json::from_str(raw)?;
    let bytes = STANDARD.decode(envelope.data.as_bytes()).map_err(|e| {
        AppError::with_source(ErrorKind::Serialization, "Invalid base64 in cache envelope", e)
    })?;
    Ok(CacheEntry::new(bytes, envelope.content_type, envelope.status)
        .with_headers(envelope.headers.unwrap_or_default()))
}
