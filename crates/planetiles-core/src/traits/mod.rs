//! Core traits defined in `planetiles-core` and implemented by other crates.

pub mod cache;
pub mod catalog;

pub use cache::CacheBackend;
pub use catalog::LayerCatalog;
