//! Peer-to-Peer Distributed Cache Library
//!
//! An embeddable read-through cache. Every node runs the same library; a consistent hash ring
//! decides which node owns a key, the owner loads it from the data source at most once per
//! burst of concurrent requests, and the other nodes fetch it from the owner over HTTP.
//! The binary (`main.rs`) runs one such node.
//!
//! ## Architecture Modules
//! - **`cache`**: Local storage. `ByteView` values in a byte-budgeted LRU store behind a
//!   lazily allocated, mutex-guarded shard.
//! - **`coalesce`**: Call coalescing. Concurrent loads of the same key share one execution.
//! - **`config`**: Transport settings (base path, ring replicas, hash function, timeouts).
//! - **`error`**: The `CacheError` type returned by `Group::get`.
//! - **`group`**: The `Group` orchestrator, the `Getter` data source trait and the name
//!   registry that the transport uses to route requests.
//! - **`hashring`**: Consistent hashing with virtual nodes.
//! - **`peers`**: Peer selection and the HTTP transport between nodes.

pub mod cache;
pub mod coalesce;
pub mod config;
pub mod error;
pub mod group;
pub mod hashring;
pub mod peers;

pub use cache::byteview::ByteView;
pub use error::{CacheError, Result};
pub use group::{Getter, GetterFn, Group, GroupRegistry, get_group, new_group};
pub use peers::pool::HttpPool;
pub use peers::{PeerGetter, PeerPicker};
