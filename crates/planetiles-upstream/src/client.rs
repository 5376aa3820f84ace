//! Shared keep-alive HTTP client for upstream providers.

use std::time::Duration;

use futures::StreamExt;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use planetiles_core::config::upstream::UpstreamConfig;
use planetiles_core::error::{AppError, ErrorKind};
use planetiles_core::result::AppResult;

/// Longest upstream error body excerpt kept for logs.
pub const ERROR_SNIPPET_CHARS: usize = 200;

/// Bytes read from an error body; enough for the excerpt in any UTF-8 text.
const ERROR_SNIPPET_BYTES: usize = ERROR_SNIPPET_CHARS * 4;

/// Upstream HTTP client.
///
/// Cloning is cheap; every clone shares one connection pool.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
}

impl UpstreamClient {
    /// Builds the client from configuration.
    pub fn new(config: &UpstreamConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .pool_idle_timeout(Duration::from_secs(config.pool_idle_timeout_seconds))
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .user_agent(config.user_agent.as_str())
            .tcp_nodelay(true)
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Failed to create upstream HTTP client: {e}"),
                    e,
                )
            })?;
        Ok(Self { http })
    }

    /// Issues a GET. Only transport failures are errors; any HTTP status
    /// is returned to the caller.
    pub async fn get(&self, url: &str) -> AppResult<reqwest::Response> {
        match self.http.get(url).send().await {
            Ok(response) => {
                debug!(
                    url,
                    status = response.status().as_u16(),
                    "Upstream response received"
                );
                Ok(response)
            }
            Err(e) => {
                warn!(
                    url,
                    error = %e,
                    is_connect = e.is_connect(),
                    is_timeout = e.is_timeout(),
                    "Upstream request failed"
                );
                Err(transport_error(e))
            }
        }
    }

    /// GETs and decodes a JSON document. Non-2xx statuses become
    /// [`ErrorKind::Upstream`] errors.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> AppResult<T> {
        let response = self.get(url).await?;
        let status = response.status();
        if !status.is_success() {
            let snippet = error_snippet(response).await;
            warn!(
                url,
                status = status.as_u16(),
                body = %snippet,
                "Upstream returned an error"
            );
            return Err(AppError::upstream(
                status.as_u16(),
                format!("Upstream returned HTTP {}", status.as_u16()),
            ));
        }
        response.json::<T>().await.map_err(|e| {
            if e.is_decode() {
                AppError::with_source(
                    ErrorKind::Upstream(502),
                    format!("Upstream returned an unreadable document: {e}"),
                    e,
                )
            } else {
                transport_error(e)
            }
        })
    }
}

/// Reads at most [`ERROR_SNIPPET_CHARS`] characters of an error body.
///
/// Stops pulling from the connection once enough bytes are buffered; the
/// rest of the body is dropped unread.
pub async fn error_snippet(response: reqwest::Response) -> String {
    let mut stream = std::pin::pin!(response.bytes_stream());
    let mut buf: Vec<u8> = Vec::with_capacity(ERROR_SNIPPET_BYTES);
    while buf.len() < ERROR_SNIPPET_BYTES {
        match stream.next().await {
            Some(Ok(chunk)) => {
                let take = chunk.len().min(ERROR_SNIPPET_BYTES - buf.len());
                buf.extend_from_slice(&chunk[..take]);
            }
            Some(Err(e)) if buf.is_empty() => return format!("<unreadable body: {e}>"),
            Some(Err(_)) | None => break,
        }
    }
    truncate_chars(&String::from_utf8_lossy(&buf), ERROR_SNIPPET_CHARS)
}

fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

fn transport_error(e: reqwest::Error) -> AppError {
    let message = if e.is_timeout() {
        "Upstream request timed out"
    } else {
        "Failed to reach upstream tile provider"
    };
    AppError::with_source(ErrorKind::Transport, message, e)
}
