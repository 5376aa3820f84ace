//! Convenience result type alias for Planetiles.

use crate::error::AppError;

/// A specialized `Result` type for Planetiles operations.
pub type AppResult<T> = Result<T, AppError>;
