//! Local Cache Module
//!
//! The in-process storage layer each group reads from before touching the network.
//!
//! ## Core Concepts
//! - **ByteView**: Immutable byte values. Everything stored in or returned by the cache is a view.
//! - **LruStore**: A single-threaded least-recently-used store whose budget is counted in bytes
//!   (`key.len() + value.byte_len()` per entry) rather than in entries.
//! - **CacheShard**: A mutex around an optional `LruStore`. The store is only allocated on the
//!   first write, so groups that never cache anything never pay for one.

pub mod byteview;
pub mod lru;
pub mod shard;
