//! # planetiles-cache
//!
//! Tile cache backends for Planetiles. Supports three modes:
//!
//! - **file**: sharded on-disk store with JSON metadata sidecars
//! - **redis**: Redis-backed store using the [redis](https://crates.io/crates/redis) crate
//! - **noop**: caching disabled
//!
//! The backend is selected once at startup by [`CacheManager::new`]. A Redis
//! backend that cannot be reached falls back to the file backend.

pub mod file;
pub mod keys;
pub mod noop;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;

pub use provider::CacheManager;
