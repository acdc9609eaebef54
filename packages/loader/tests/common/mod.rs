//! Shared fixtures for load coordinator tests
//!
//! `RecordingBatchFn` is an in-memory executor that records every key set it
//! receives and can be configured to fail, omit keys, or hold batches open.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use bookstore_loader::{BatchFn, BatchResult};
use parking_lot::Mutex;
use tokio::sync::Semaphore;

/// In-memory batch executor that records its calls
#[derive(Clone, Default)]
pub struct RecordingBatchFn {
    calls: Arc<Mutex<Vec<Vec<u32>>>>,
    gate: Option<Arc<Semaphore>>,
    batch_error: Option<String>,
    omitted: HashSet<u32>,
    failing: HashSet<u32>,
}

impl RecordingBatchFn {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold every batch until a permit is added to `gate`
    pub fn gated(mut self, gate: Arc<Semaphore>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Fail every batch with `error`
    pub fn failing_batch(mut self, error: &str) -> Self {
        self.batch_error = Some(error.to_string());
        self
    }

    /// Leave `key` out of the result map
    pub fn omitting(mut self, key: u32) -> Self {
        self.omitted.insert(key);
        self
    }

    /// Report an error for `key` only
    pub fn failing_key(mut self, key: u32) -> Self {
        self.failing.insert(key);
        self
    }

    /// Key sets received so far, in call order
    pub fn calls(&self) -> Vec<Vec<u32>> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// How many times `key` has been fetched across all batches
    pub fn fetches_of(&self, key: u32) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|keys| keys.contains(&key))
            .count()
    }
}

pub fn value_for(key: u32) -> String {
    format!("value-{}", key)
}

impl BatchFn<u32> for RecordingBatchFn {
    type Value = String;
    type Error = String;

    async fn load(&self, keys: &[u32]) -> Result<BatchResult<u32, String, String>, String> {
        self.calls.lock().push(keys.to_vec());

        if let Some(gate) = &self.gate {
            gate.acquire().await.map_err(|e| e.to_string())?.forget();
        }

        if let Some(error) = &self.batch_error {
            return Err(error.clone());
        }

        Ok(keys
            .iter()
            .filter(|key| !self.omitted.contains(*key))
            .map(|key| {
                let result = if self.failing.contains(key) {
                    Err(format!("bad key {}", key))
                } else {
                    Ok(value_for(*key))
                };
                (*key, result)
            })
            .collect())
    }
}

/// Yield until the executor has seen `count` calls
///
/// Panics after one second so a broken coordinator fails the test instead
/// of hanging it.
pub async fn wait_for_calls(batch_fn: &RecordingBatchFn, count: usize) {
    tokio::time::timeout(Duration::from_secs(1), async {
        while batch_fn.call_count() < count {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("executor was not called in time");
}
