use crate::peers::BoxFuture;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

/// The source of truth for a group: produces the value of a key missing from every cache.
pub trait Getter: Send + Sync {
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, anyhow::Result<Vec<u8>>>;
}

/// Adapts an async closure taking the key by value into a [`Getter`].
///
/// ```
/// use distributed_cache::group::GetterFn;
///
/// let getter = GetterFn(|key: String| async move { Ok::<_, anyhow::Error>(key.into_bytes()) });
/// ```
pub struct GetterFn<F>(pub F);

impl<F, Fut> Getter for GetterFn<F>
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<Vec<u8>>> + Send + 'static,
{
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, anyhow::Result<Vec<u8>>> {
        Box::pin((self.0)(key.to_string()))
    }
}

/// Live counters of one group.
#[derive(Debug, Default)]
pub struct GroupStats {
    /// Every call to `get`, including cache hits.
    pub gets: AtomicU64,
    pub cache_hits: AtomicU64,
    /// Misses that went through the coalescer.
    pub loads: AtomicU64,
    /// Loads that actually ran (one per coalescing window).
    pub loads_deduped: AtomicU64,
    pub peer_loads: AtomicU64,
    pub peer_errors: AtomicU64,
    pub local_loads: AtomicU64,
    pub local_load_errs: AtomicU64,
}

impl GroupStats {
    pub(crate) fn incr(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// Point-in-time copy of a group's counters and cache usage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub group: String,
    pub gets: u64,
    pub cache_hits: u64,
    pub loads: u64,
    pub loads_deduped: u64,
    pub peer_loads: u64,
    pub peer_errors: u64,
    pub local_loads: u64,
    pub local_load_errs: u64,
    pub cache_entries: usize,
    pub cache_bytes: usize,
}
