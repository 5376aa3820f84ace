//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use planetiles_core::error::{AppError, ErrorKind};
use planetiles_core::types::ErrorEnvelope;

const UPSTREAM_ERROR: &str = "Upstream tile provider returned an error";
const TRANSPORT_ERROR: &str = "Failed to reach upstream tile provider";
const INTERNAL_ERROR: &str = "Internal server error";

/// Error returned by handlers; converts into the JSON error envelope.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// Status code and client-facing message for an error.
///
/// Upstream and internal details never reach the client; they are logged.
pub fn status_and_message(err: &AppError) -> (StatusCode, String) {
    match err.kind {
        ErrorKind::Validation => (StatusCode::BAD_REQUEST, err.message.clone()),
        ErrorKind::NotFound | ErrorKind::OutOfBounds => {
            (StatusCode::NOT_FOUND, err.message.clone())
        }
        ErrorKind::Upstream(status) => {
            let status = StatusCode::from_u16(status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY);
            (status, UPSTREAM_ERROR.to_string())
        }
        ErrorKind::Transport => (
            StatusCode::INTERNAL_SERVER_ERROR,
            TRANSPORT_ERROR.to_string(),
        ),
        ErrorKind::Internal
        | ErrorKind::Cache
        | ErrorKind::Configuration
        | ErrorKind::Serialization => (
            StatusCode::INTERNAL_SERVER_ERROR,
            INTERNAL_ERROR.to_string(),
        ),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let (status, message) = status_and_message(&err);

        match err.kind {
            ErrorKind::Transport => {
                tracing::error!(
                    error = %err,
                    source = ?err.source,
                    "Upstream transport failure"
                );
            }
            ErrorKind::Upstream(_) => {
                tracing::debug!(error = %err, "Mirroring upstream error status");
            }
            _ if status.is_server_error() => {
                tracing::error!(
                    error = %err,
                    source = ?err.source,
                    "Internal server error"
                );
            }
            _ => {}
        }

        (status, Json(ErrorEnvelope::new(message))).into_response()
    }
}
