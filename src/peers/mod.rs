//! Peer Transport Module
//!
//! The boundary between a group and the other nodes of the cluster.
//!
//! ## Core Concepts
//! - **PeerPicker**: Decides which remote node owns a key (or that this node does).
//! - **PeerGetter**: Fetches a value for `(group, key)` from one specific remote node.
//! - **HttpPool**: The HTTP implementation of both sides. It picks peers with a consistent hash
//!   ring, talks to them with `reqwest`, and serves their requests with an `axum` router.
//!
//! ## Submodules
//! - **`pool`**: Peer set management and peer selection.
//! - **`client`**: The HTTP peer getter.
//! - **`handlers`**: The axum handler answering peer requests.
//! - **`protocol`**: Path conventions shared by client and server.

pub mod client;
pub mod handlers;
pub mod pool;
pub mod protocol;

use bytes::Bytes;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// A boxed, sendable future, used to keep the transport traits object-safe.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Resolves the remote node responsible for a key.
pub trait PeerPicker: Send + Sync {
    /// Returns `None` when there are no peers or when this node owns the key.
    fn pick_peer(&self, key: &str) -> Option<Arc<dyn PeerGetter>>;
}

/// Fetches values from one remote node.
pub trait PeerGetter: Send + Sync {
    /// Network failures and non-success responses are errors. Nothing is retried.
    fn get<'a>(&'a self, group: &'a str, key: &'a str) -> BoxFuture<'a, anyhow::Result<Bytes>>;
}
