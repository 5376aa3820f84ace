//! Cached HTTP response bodies.

use std::collections::BTreeMap;

use bytes::Bytes;

/// One cached upstream response: body plus the metadata needed to replay it.
///
/// Entries are immutable once built; backends only ever store and return
/// whole entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    bytes: Bytes,
    content_type: String,
    status: u16,
    headers: Option<BTreeMap<String, String>>,
}

impl CacheEntry {
    /// Creates an entry without extra headers.
    pub fn new(bytes: impl Into<Bytes>, content_type: impl Into<String>, status: u16) -> Self {
        Self {
            bytes: bytes.into(),
            content_type: content_type.into(),
            status,
            headers: None,
        }
    }

    /// Attaches the response headers that must be replayed on a hit.
    pub fn with_headers(mut self, headers: BTreeMap<String, String>) -> Self {
        self.headers = if headers.is_empty() {
            None
        } else {
            Some(headers)
        };
        self
    }

    /// Body bytes.
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// MIME type of the body.
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// HTTP status the entry was stored with.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Extra headers stored with the entry.
    pub fn headers(&self) -> Option<&BTreeMap<String, String>> {
        self.headers.as_ref()
    }

    /// Body length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the body is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_headers_are_normalized_to_none() {
        let entry = CacheEntry::new(vec![1u8, 2, 3], "image/png", 200)
            .with_headers(BTreeMap::new());
        assert!(entry.headers().is_none());
        assert_eq!(entry.len(), 3);
    }
}
