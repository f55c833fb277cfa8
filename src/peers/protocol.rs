//! Peer Network Protocol
//!
//! A peer request is a plain `GET <peer><base_path><group>/<key>`, with the group and key
//! percent-escaped as single path segments. A successful response carries the raw value bytes;
//! any other status is an error whose body is the error text.

use anyhow::{Result, anyhow};
use reqwest::Url;

/// Content type of successful peer responses.
pub const CONTENT_TYPE_VALUE: &str = "application/octet-stream";

/// Axum route matching peer requests under `base_path`.
pub fn route_path(base_path: &str) -> String {
    format!("{}:group/:key", base_path)
}

/// Builds the request URL for `(group, key)` on the peer reachable at `base_url`
/// (peer address followed by the base path).
pub fn peer_url(base_url: &str, group: &str, key: &str) -> Result<Url> {
    let mut url = Url::parse(base_url)?;
    url.path_segments_mut()
        .map_err(|_| anyhow!("peer address {} cannot carry a path", base_url))?
        .pop_if_empty()
        .push(group)
        .push(key);
    Ok(url)
}
