//! # planetiles-core
//!
//! Core crate for Planetiles. Contains configuration schemas, the tile and
//! layer domain types, the cache backend and layer catalog traits, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other Planetiles crates.

pub mod catalog;
pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
