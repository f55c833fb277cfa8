use parking_lot::Mutex;

use super::byteview::ByteView;
use super::lru::LruStore;

/// Thread-safe wrapper around a lazily allocated [`LruStore`].
pub struct CacheShard {
    max_bytes: usize,
    lru: Mutex<Option<LruStore<ByteView>>>,
}

impl CacheShard {
    pub fn new(max_bytes: usize) -> Self {
        Self {
            max_bytes,
            lru: Mutex::new(None),
        }
    }

    pub fn add(&self, key: &str, value: ByteView) {
        let mut lru = self.lru.lock();
        lru.get_or_insert_with(|| LruStore::new(self.max_bytes))
            .add(key, value);
    }

    /// Reads never allocate the backing store.
    pub fn get(&self, key: &str) -> Option<ByteView> {
        let mut lru = self.lru.lock();
        lru.as_mut()?.get(key).cloned()
    }

    pub fn is_allocated(&self) -> bool {
        self.lru.lock().is_some()
    }

    pub fn len(&self) -> usize {
        self.lru.lock().as_ref().map_or(0, |lru| lru.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn bytes(&self) -> usize {
        self.lru.lock().as_ref().map_or(0, |lru| lru.bytes())
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }
}
