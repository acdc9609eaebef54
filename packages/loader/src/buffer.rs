//! Key batch buffer for one coordination window

use std::collections::HashMap;

use tokio::sync::oneshot;

use crate::batch_fn::Key;
use crate::error::LoadResult;

/// Single-assignment result slot for one caller
pub(crate) type Waiter<V, E> = oneshot::Sender<LoadResult<V, E>>;

/// Keys and callers accumulated while a window is open
pub(crate) struct Window<K, V, E> {
    id: u64,
    /// Unique keys in first-request order
    keys: Vec<K>,
    /// Fan-out list per key, in request order
    waiters: HashMap<K, Vec<Waiter<V, E>>>,
}

impl<K: Key, V, E> Window<K, V, E> {
    pub(crate) fn new(id: u64) -> Self {
        Self {
            id,
            keys: Vec::new(),
            waiters: HashMap::new(),
        }
    }

    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    /// Attach a caller to `key`, returning `true` if the key is new to this window
    pub(crate) fn push(&mut self, key: K, waiter: Waiter<V, E>) -> bool {
        match self.waiters.get_mut(&key) {
            Some(list) => {
                list.push(waiter);
                false
            }
            None => {
                self.keys.push(key.clone());
                self.waiters.insert(key, vec![waiter]);
                true
            }
        }
    }

    /// Unique keys in first-request order
    pub(crate) fn keys(&self) -> &[K] {
        &self.keys
    }

    /// Number of unique keys
    pub(crate) fn len(&self) -> usize {
        self.keys.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub(crate) fn into_parts(self) -> (Vec<K>, HashMap<K, Vec<Waiter<V, E>>>) {
        (self.keys, self.waiters)
    }
}
