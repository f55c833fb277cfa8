use std::sync::Arc;

/// Errors returned by [`Group::get`](crate::group::Group::get).
///
/// The type is `Clone` because a single load result is handed to every caller coalesced onto it.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CacheError {
    /// The caller asked for the empty key.
    #[error("key is required")]
    EmptyKey,
    /// The group's getter failed. Not cached; the next call retries the getter.
    #[error("{0}")]
    Source(Arc<anyhow::Error>),
}

impl From<anyhow::Error> for CacheError {
    fn from(err: anyhow::Error) -> Self {
        Self::Source(Arc::new(err))
    }
}

pub type Result<T> = std::result::Result<T, CacheError>;
