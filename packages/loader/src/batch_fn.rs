//! Batch executor contract
//!
//! A [`BatchFn`] turns one set of keys into one bulk storage operation. The
//! coordinator guarantees the key slice is non-empty and duplicate-free; the
//! executor must answer for every key it was given.

use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;

/// Per-key outcome of one bulk fetch
pub type BatchResult<K, V, E> = HashMap<K, Result<V, E>>;

/// Bounds every coordinator key must satisfy
pub trait Key: Eq + Hash + Clone + Debug + Send + Sync + 'static {}

impl<T> Key for T where T: Eq + Hash + Clone + Debug + Send + Sync + 'static {}

/// Bulk fetch for a set of keys
///
/// Implementations should issue a single storage round-trip per call and
/// partition the rows by key locally.
pub trait BatchFn<K: Key>: Send + Sync + 'static {
    /// Value handed to every caller of a key
    type Value: Clone + Send + Sync + 'static;

    /// Error for the whole batch or for a single key
    type Error: Clone + Send + Sync + 'static;

    /// Load all `keys` at once
    ///
    /// `Err` fails every caller in the batch. An `Err` entry in the map fails
    /// only that key's callers.
    fn load(
        &self,
        keys: &[K],
    ) -> impl Future<Output = Result<BatchResult<K, Self::Value, Self::Error>, Self::Error>> + Send;
}

/// Wrap plain values into a [`BatchResult`] where every entry succeeded
pub fn ok_map<K, V, E, I>(entries: I) -> BatchResult<K, V, E>
where
    K: Key,
    I: IntoIterator<Item = (K, V)>,
{
    entries.into_iter().map(|(k, v)| (k, Ok(v))).collect()
}
