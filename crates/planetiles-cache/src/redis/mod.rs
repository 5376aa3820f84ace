//! Redis cache backend.

pub mod client;
pub mod envelope;
pub mod operations;

pub use client::RedisClient;
pub use operations::RedisCacheBackend;
