//! Transport Configuration
//!
//! Settings for the HTTP peer pool. Every field has a default, so `PoolConfig::default()`
//! is a working configuration; the `with_*` builders override individual settings.

use crate::hashring::HashFn;
use crate::hashring::ring::DEFAULT_REPLICAS;
use std::time::Duration;

/// Path prefix under which peers serve each other.
pub const DEFAULT_BASE_PATH: &str = "/_cache/";
/// Upper bound for a single peer request, connection included.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Always starts and ends with `/`.
    pub base_path: String,
    /// Virtual points per peer on the hash ring.
    pub replicas: usize,
    /// Ring hash function. `None` selects CRC-32.
    pub hash: Option<HashFn>,
    pub request_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            base_path: DEFAULT_BASE_PATH.to_string(),
            replicas: DEFAULT_REPLICAS,
            hash: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl PoolConfig {
    pub fn with_base_path(mut self, base_path: &str) -> Self {
        let cleaned = base_path.trim_matches('/');
        self.base_path = if cleaned.is_empty() {
            "/".to_string()
        } else {
            format!("/{}/", cleaned)
        };
        self
    }

    pub fn with_replicas(mut self, replicas: usize) -> Self {
        self.replicas = replicas;
        self
    }

    pub fn with_hash(mut self, hash: HashFn) -> Self {
        self.hash = Some(hash);
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
