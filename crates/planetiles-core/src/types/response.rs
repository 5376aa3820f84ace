//! Wire shapes shared by every error response.

use serde::{Deserialize, Serialize};

/// JSON body of every non-2xx response: `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Human-readable message, safe to show to clients.
    pub error: String,
}

impl ErrorEnvelope {
    /// Creates an envelope with the given message.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
