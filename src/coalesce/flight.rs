use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::future::Future;
use tokio::sync::watch;

/// Deduplicates concurrent loads by key.
///
/// Each in-flight load is represented by a `watch` channel that starts out empty and is filled
/// exactly once by the leader. The map lock is only held while checking for (or inserting) the
/// record, never while a load runs, so loads for different keys proceed in parallel.
pub struct Coalescer<T> {
    calls: DashMap<String, watch::Receiver<Option<T>>>,
}

/// Removes the in-flight record when the leader finishes, is cancelled, or panics.
struct InFlight<'a, T> {
    calls: &'a DashMap<String, watch::Receiver<Option<T>>>,
    key: &'a str,
}

impl<T> Drop for InFlight<'_, T> {
    fn drop(&mut self) {
        self.calls.remove(self.key);
    }
}

impl<T> Coalescer<T>
where
    T: Clone + Send + Sync,
{
    pub fn new() -> Self {
        Self {
            calls: DashMap::new(),
        }
    }

    /// Runs `load` for `key` unless a load for the same key is already running, in which case
    /// the caller waits for that load and gets a clone of its result.
    ///
    /// If the leading caller goes away before publishing a result, its waiters start over and
    /// one of them runs its own `load`.
    pub async fn run<F, Fut>(&self, key: &str, load: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let tx = loop {
            let mut rx = match self.calls.entry(key.to_string()) {
                Entry::Occupied(entry) => entry.get().clone(),
                Entry::Vacant(entry) => {
                    let (tx, rx) = watch::channel(None);
                    entry.insert(rx);
                    break tx;
                }
            };

            if let Ok(result) = rx.wait_for(Option::is_some).await {
                if let Some(value) = &*result {
                    return value.clone();
                }
            }
            tracing::debug!("In-flight load for {} was abandoned, retrying", key);
        };

        let _record = InFlight {
            calls: &self.calls,
            key,
        };
        let result = load().await;
        tx.send_replace(Some(result.clone()));
        result
    }

    /// Number of keys with a load currently in flight.
    pub fn in_flight(&self) -> usize {
        self.calls.len()
    }
}

impl<T> Default for Coalescer<T>
where
    T: Clone + Send + Sync,
{
    fn default() -> Self {
        Self::new()
    }
}
