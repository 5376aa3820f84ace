//! Sharded filesystem cache backend.

pub mod metadata;
pub mod store;

pub use metadata::FileCacheMetadata;
pub use store::FileCacheBackend;
