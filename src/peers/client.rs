//! HTTP Peer Getter
//!
//! Fetches `(group, key)` from one remote node over HTTP.

use super::protocol::peer_url;
use super::{BoxFuture, PeerGetter};

use anyhow::{Context, anyhow};
use bytes::Bytes;
use std::time::Duration;

/// Client side of the peer protocol, bound to a single remote node.
pub struct HttpGetter {
    /// Peer address followed by the base path, e.g. `http://10.0.0.2:8001/_cache/`.
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpGetter {
    pub fn new(base_url: impl Into<String>, client: reqwest::Client, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            client,
            timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl PeerGetter for HttpGetter {
    fn get<'a>(&'a self, group: &'a str, key: &'a str) -> BoxFuture<'a, anyhow::Result<Bytes>> {
        Box::pin(async move {
            let url = peer_url(&self.base_url, group, key)?;
            tracing::debug!("Fetching {}", url);

            let response = self
                .client
                .get(url)
                .timeout(self.timeout)
                .send()
                .await
                .with_context(|| format!("request to {} failed", self.base_url))?;

            let status = response.status();
            if !status.is_success() {
                return Err(anyhow!("server returned {}", status));
            }

            response
                .bytes()
                .await
                .with_context(|| format!("reading response body from {}", self.base_url))
        })
    }
}
