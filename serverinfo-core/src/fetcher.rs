//! Fetcher: one HTTP GET, full body read, JSON parse
//!
//! The response status is not inspected; whatever body can be read is handed
//! to the JSON parser. The connection goes back to the client pool (or is
//! closed) when the response is dropped, on every path.

use crate::error::FetchError;
use crate::snapshot::Snapshot;
use futures::future::BoxFuture;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Anything that can produce a snapshot for a URL. Failures are reported as
/// `None`; the implementation logs them.
pub trait SnapshotSource: Send + Sync + 'static {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Option<Snapshot>>;
}

/// `reqwest`-backed fetcher shared by all pollers
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Fetcher with a per-request timeout. `None` keeps the client default,
    /// which never times out.
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Fetch and parse one snapshot, keeping the failure reason
    pub async fn fetch_snapshot(&self, url: &str) -> Result<Snapshot, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        debug!("GET {} -> {}", url, response.status());

        let body = response.text().await.map_err(|source| FetchError::Body {
            url: url.to_string(),
            source,
        })?;

        let document: Value = serde_json::from_str(&body).map_err(|source| FetchError::Parse {
            url: url.to_string(),
            source,
        })?;

        Snapshot::from_value(document).ok_or_else(|| FetchError::NotAnObject {
            url: url.to_string(),
        })
    }
}

impl SnapshotSource for HttpFetcher {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Option<Snapshot>> {
        Box::pin(async move {
            match self.fetch_snapshot(url).await {
                Ok(snapshot) => Some(snapshot),
                Err(e) => {
                    warn!("Fetch failed: {}", e);
                    None
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_address_is_a_transport_failure() {
        let fetcher = HttpFetcher::new();
        let err = fetcher.fetch_snapshot("").await.unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }));
        assert!(fetcher.fetch("").await.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_host_yields_no_snapshot() {
        // port 9 on loopback: nothing listens there in CI
        let fetcher = HttpFetcher::with_timeout(Some(Duration::from_secs(2))).unwrap();
        assert!(fetcher.fetch("http://127.0.0.1:9/").await.is_none());
    }
}
