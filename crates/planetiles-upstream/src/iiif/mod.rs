//! IIIF Image API adapter and `info.json` memoization.

pub mod adapter;
pub mod info_store;

pub use adapter::IiifAdapter;
pub use info_store::{IiifInfoStore, MemoryIiifInfoStore};

/// Joins a IIIF base URL and an image identifier.
///
/// The identifier is percent-encoded so identifiers containing `/` stay a
/// single path segment.
pub(crate) fn image_url(base_url: &str, identifier: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(identifier)
    )
}
