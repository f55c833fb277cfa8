//! Cache Group
//!
//! A named namespace of cached values with its own getter, local cache and peer strategy.
//!
//! ## Lookup Flow
//! 1. **Validate**: The empty key is rejected before anything else happens.
//! 2. **Local hit**: Served straight from the `CacheShard`, without coalescing.
//! 3. **Load**: Misses run inside the `Coalescer`, so concurrent misses on a key load it once:
//!    - If a peer owns the key, fetch it from that peer. The value is returned but **not**
//!      cached here; only the owner caches it. A failed peer fetch falls back to the getter.
//!    - Otherwise call the getter and populate the local cache with the result.

use super::types::{Getter, GroupStats, StatsSnapshot};
use crate::cache::byteview::ByteView;
use crate::cache::shard::CacheShard;
use crate::coalesce::Coalescer;
use crate::error::{CacheError, Result};
use crate::peers::{PeerGetter, PeerPicker};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

pub struct Group {
    name: String,
    getter: Arc<dyn Getter>,
    main_cache: CacheShard,
    peers: OnceLock<Arc<dyn PeerPicker>>,
    loader: Coalescer<Result<ByteView>>,
    stats: GroupStats,
}

impl Group {
    pub(crate) fn new(name: &str, max_bytes: usize, getter: Arc<dyn Getter>) -> Self {
        Self {
            name: name.to_string(),
            getter,
            main_cache: CacheShard::new(max_bytes),
            peers: OnceLock::new(),
            loader: Coalescer::new(),
            stats: GroupStats::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Binds the peer picker used to route misses to their owners.
    ///
    /// # Panics
    /// If a picker is already registered. Swapping pickers while lookups are running is not
    /// supported.
    pub fn register_peers(&self, peers: Arc<dyn PeerPicker>) {
        if self.peers.set(peers).is_err() {
            panic!("register_peers called more than once for group {}", self.name);
        }
    }

    pub async fn get(&self, key: &str) -> Result<ByteView> {
        GroupStats::incr(&self.stats.gets);
        if key.is_empty() {
            return Err(CacheError::EmptyKey);
        }

        if let Some(value) = self.main_cache.get(key) {
            GroupStats::incr(&self.stats.cache_hits);
            tracing::debug!("[{}] cache hit for {}", self.name, key);
            return Ok(value);
        }

        self.load(key).await
    }

    async fn load(&self, key: &str) -> Result<ByteView> {
        GroupStats::incr(&self.stats.loads);

        self.loader
            .run(key, || async move {
                GroupStats::incr(&self.stats.loads_deduped);

                if let Some(peer) = self.peers.get().and_then(|picker| picker.pick_peer(key)) {
                    match self.get_from_peer(peer.as_ref(), key).await {
                        Ok(value) => {
                            GroupStats::incr(&self.stats.peer_loads);
                            return Ok(value);
                        }
                        Err(e) => {
                            GroupStats::incr(&self.stats.peer_errors);
                            tracing::warn!(
                                "[{}] failed to get {} from peer, loading locally: {:#}",
                                self.name,
                                key,
                                e
                            );
                        }
                    }
                }

                self.get_locally(key).await
            })
            .await
    }

    async fn get_from_peer(&self, peer: &dyn PeerGetter, key: &str) -> anyhow::Result<ByteView> {
        let bytes = peer.get(&self.name, key).await?;
        Ok(ByteView::copy_from_slice(&bytes))
    }

    async fn get_locally(&self, key: &str) -> Result<ByteView> {
        match self.getter.get(key).await {
            Ok(bytes) => {
                GroupStats::incr(&self.stats.local_loads);
                let value = ByteView::from(bytes);
                self.populate_cache(key, value.clone());
                Ok(value)
            }
            Err(e) => {
                GroupStats::incr(&self.stats.local_load_errs);
                tracing::debug!("[{}] getter failed for {}: {:#}", self.name, key, e);
                Err(CacheError::from(e))
            }
        }
    }

    fn populate_cache(&self, key: &str, value: ByteView) {
        self.main_cache.add(key, value);
    }

    pub fn stats(&self) -> StatsSnapshot {
        let load = |counter: &AtomicU64| counter.load(Ordering::Relaxed);
        StatsSnapshot {
            group: self.name.clone(),
            gets: load(&self.stats.gets),
            cache_hits: load(&self.stats.cache_hits),
            loads: load(&self.stats.loads),
            loads_deduped: load(&self.stats.loads_deduped),
            peer_loads: load(&self.stats.peer_loads),
            peer_errors: load(&self.stats.peer_errors),
            local_loads: load(&self.stats.local_loads),
            local_load_errs: load(&self.stats.local_load_errs),
            cache_entries: self.main_cache.len(),
            cache_bytes: self.main_cache.bytes(),
        }
    }

    pub(crate) fn main_cache(&self) -> &CacheShard {
        &self.main_cache
    }

    pub(crate) fn loader(&self) -> &Coalescer<Result<ByteView>> {
        &self.loader
    }
}
