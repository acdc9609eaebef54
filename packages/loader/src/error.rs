//! Errors delivered to callers of [`LoadCoordinator::load`](crate::LoadCoordinator::load)

use thiserror::Error;

/// Outcome of a single pending request that did not produce a value
///
/// `E` is the batch executor's error type. It is cloned once per caller, so
/// executors usually wrap non-`Clone` errors in an `Arc`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError<E> {
    /// The bulk fetch failed for the whole batch
    #[error("batch load failed: {0}")]
    Batch(E),

    /// The executor reported an error for this key only
    #[error("load failed for key: {0}")]
    Key(E),

    /// The executor returned no entry for a requested key
    #[error("batch executor returned no result for a requested key")]
    Missing,

    /// The coordinator was cancelled before the request resolved
    #[error("load cancelled")]
    Cancelled,
}

impl<E> LoadError<E> {
    /// Whether this error came from cancellation rather than the executor
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Whether the executor broke its contract by omitting the key
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// The executor error, if there is one
    pub fn source_error(&self) -> Option<&E> {
        match self {
            Self::Batch(e) | Self::Key(e) => Some(e),
            Self::Missing | Self::Cancelled => None,
        }
    }
}

/// Result type for a single load
pub type LoadResult<V, E> = Result<V, LoadError<E>>;
