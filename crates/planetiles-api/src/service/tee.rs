//! A byte stream that copies what it forwards into the tile cache.

use std::collections::BTreeMap;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll, ready};

use bytes::{Bytes, BytesMut};
use futures::Stream;
use pin_project_lite::pin_project;
use tracing::debug;

use planetiles_cache::CacheManager;
use planetiles_core::types::CacheEntry;

/// Where a fully received body is written.
#[derive(Debug)]
pub struct CacheSink {
    cache: Arc<CacheManager>,
    key: String,
    content_type: String,
    status: u16,
    headers: BTreeMap<String, String>,
}

impl CacheSink {
    pub fn new(
        cache: Arc<CacheManager>,
        key: String,
        content_type: String,
        status: u16,
        headers: BTreeMap<String, String>,
    ) -> Self {
        Self {
            cache,
            key,
            content_type,
            status,
            headers,
        }
    }

    /// Writes `body` on a background task so the response is not held up.
    fn spawn_write(self, body: Bytes) {
        let entry = CacheEntry::new(body, self.content_type, self.status)
            .with_headers(self.headers);
        tokio::spawn(async move {
            self.cache.set(&self.key, &entry, None).await;
            debug!(key = %self.key, bytes = entry.len(), "Cached upstream tile");
        });
    }
}

pin_project! {
    /// Forwards every chunk of `inner` unchanged while buffering up to
    /// `limit` bytes. The buffer is written to the cache only when `inner`
    /// ends without error; a dropped or failed stream caches nothing.
    pub struct CacheTee<S> {
        #[pin]
        inner: S,
        buffer: Option<BytesMut>,
        sink: Option<CacheSink>,
        limit: usize,
    }
}

impl<S> CacheTee<S> {
    pub fn new(inner: S, sink: CacheSink, limit: usize) -> Self {
        Self {
            inner,
            buffer: Some(BytesMut::new()),
            sink: Some(sink),
            limit,
        }
    }
}

impl<S, E> Stream for CacheTee<S>
where
    S: Stream<Item = Result<Bytes, E>>,
{
    type Item = Result<Bytes, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();
        match ready!(this.inner.poll_next(cx)) {
            Some(Ok(chunk)) => {
                if let Some(buffer) = this.buffer.as_mut() {
                    if buffer.len() + chunk.len() > *this.limit {
                        debug!(
                            limit = *this.limit,
                            "Tile exceeds max cache entry size, not caching"
                        );
                        *this.buffer = None;
                        *this.sink = None;
                    } else {
                        buffer.extend_from_slice(&chunk);
                    }
                }
                Poll::Ready(Some(Ok(chunk)))
            }
            Some(Err(e)) => {
                *this.buffer = None;
                *this.sink = None;
                Poll::Ready(Some(Err(e)))
            }
            None => {
                if let (Some(buffer), Some(sink)) = (this.buffer.take(), this.sink.take()) {
                    sink.spawn_write(buffer.freeze());
                }
                Poll::Ready(None)
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
