//! Byte-budgeted LRU Store
//!
//! Entries live in a slot vector and are threaded into a doubly linked recency list by index
//! (head = most recently used, tail = least recently used). A `HashMap` maps each key to its slot.
//! Freed slots are recycled through a free list, so steady-state inserts do not reallocate.
//!
//! The store is not synchronized; [`CacheShard`](super::shard::CacheShard) wraps it in a mutex.

use std::collections::HashMap;

/// Anything that can be stored and accounted for by size.
pub trait Value {
    /// Number of bytes this value counts against the store budget.
    fn byte_len(&self) -> usize;
}

impl Value for String {
    fn byte_len(&self) -> usize {
        self.len()
    }
}

impl Value for Vec<u8> {
    fn byte_len(&self) -> usize {
        self.len()
    }
}

/// Called with the key and value of every evicted entry, in eviction order.
pub type EvictionCallback<V> = Box<dyn FnMut(String, V) + Send>;

struct Entry<V> {
    key: String,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

pub struct LruStore<V> {
    /// Budget in bytes. Zero means unbounded.
    max_bytes: usize,
    /// Sum of `key.len() + value.byte_len()` over all live entries.
    nbytes: usize,
    slots: Vec<Option<Entry<V>>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    index: HashMap<String, usize>,
    on_evicted: Option<EvictionCallback<V>>,
}

impl<V: Value> LruStore<V> {
    pub fn new(max_bytes: usize) -> Self {
        Self {
            max_bytes,
            nbytes: 0,
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            index: HashMap::new(),
            on_evicted: None,
        }
    }

    pub fn with_eviction<F>(max_bytes: usize, on_evicted: F) -> Self
    where
        F: FnMut(String, V) + Send + 'static,
    {
        let mut store = Self::new(max_bytes);
        store.on_evicted = Some(Box::new(on_evicted));
        store
    }

    /// Looks up `key` and, on a hit, marks it as most recently used.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        let idx = *self.index.get(key)?;
        self.move_to_front(idx);
        self.slots[idx].as_ref().map(|entry| &entry.value)
    }

    /// Looks up `key` without touching its recency.
    pub fn peek(&self, key: &str) -> Option<&V> {
        let idx = *self.index.get(key)?;
        self.slots[idx].as_ref().map(|entry| &entry.value)
    }

    /// Inserts or replaces `key`, then evicts from the tail until the budget holds.
    pub fn add(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();

        if let Some(&idx) = self.index.get(&key) {
            if let Some(entry) = self.slots[idx].as_mut() {
                let old = std::mem::replace(&mut entry.value, value);
                self.nbytes = self.nbytes + entry.value.byte_len() - old.byte_len();
            }
            self.move_to_front(idx);
        } else {
            let size = key.len() + value.byte_len();
            let entry = Entry {
                key: key.clone(),
                value,
                prev: None,
                next: None,
            };
            let idx = match self.free.pop() {
                Some(idx) => {
                    self.slots[idx] = Some(entry);
                    idx
                }
                None => {
                    self.slots.push(Some(entry));
                    self.slots.len() - 1
                }
            };
            self.push_front(idx);
            self.index.insert(key, idx);
            self.nbytes += size;
        }

        while self.max_bytes != 0 && self.nbytes > self.max_bytes {
            if !self.remove_oldest() {
                break;
            }
        }
    }

    /// Evicts the least recently used entry. Returns `false` if the store was empty.
    pub fn remove_oldest(&mut self) -> bool {
        let Some(idx) = self.tail else {
            return false;
        };
        self.unlink(idx);
        let Some(entry) = self.slots[idx].take() else {
            return false;
        };
        self.free.push(idx);
        self.index.remove(&entry.key);
        self.nbytes -= entry.key.len() + entry.value.byte_len();

        if let Some(on_evicted) = self.on_evicted.as_mut() {
            on_evicted(entry.key, entry.value);
        }
        true
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Bytes currently accounted against the budget.
    pub fn bytes(&self) -> usize {
        self.nbytes
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Keys from most to least recently used.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys = Vec::with_capacity(self.len());
        let mut cursor = self.head;
        while let Some(idx) = cursor {
            match &self.slots[idx] {
                Some(entry) => {
                    keys.push(entry.key.as_str());
                    cursor = entry.next;
                }
                None => break,
            }
        }
        keys
    }

    fn move_to_front(&mut self, idx: usize) {
        if self.head == Some(idx) {
            return;
        }
        self.unlink(idx);
        self.push_front(idx);
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match &self.slots[idx] {
            Some(entry) => (entry.prev, entry.next),
            None => return,
        };
        match prev {
            Some(p) => self.set_next(p, next),
            None => self.head = next,
        }
        match next {
            Some(n) => self.set_prev(n, prev),
            None => self.tail = prev,
        }
    }

    fn push_front(&mut self, idx: usize) {
        let old_head = self.head;
        if let Some(entry) = self.slots[idx].as_mut() {
            entry.prev = None;
            entry.next = old_head;
        }
        match old_head {
            Some(h) => self.set_prev(h, Some(idx)),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }

    fn set_prev(&mut self, idx: usize, prev: Option<usize>) {
        if let Some(entry) = self.slots[idx].as_mut() {
            entry.prev = prev;
        }
    }

    fn set_next(&mut self, idx: usize, next: Option<usize>) {
        if let Some(entry) = self.slots[idx].as_mut() {
            entry.next = next;
        }
    }
}
