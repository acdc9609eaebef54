//! Per-request load coordinator
//!
//! A [`LoadCoordinator`] collects the keys requested while one window is open,
//! sends the unique set to its [`BatchFn`] in a single call, and fans the
//! results back out to every caller.
//!
//! Tokio has no "end of tick" hook, so a window is closed by one of:
//! - a debounce task spawned when the window opens, firing after
//!   [`LoaderConfig::delay`]
//! - the window reaching [`LoaderConfig::max_batch_size`] unique keys
//! - an explicit [`LoadCoordinator::flush`] from the execution engine
//!
//! The active window is swapped out under the state lock before the executor
//! runs, so a request that arrives during a fetch always opens a new window.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use parking_lot::Mutex;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

use crate::batch_fn::{BatchFn, Key};
use crate::buffer::Window;
use crate::config::LoaderConfig;
use crate::distribute::{cancel_window, distribute};
use crate::error::{LoadError, LoadResult};

/// Counters describing a coordinator's work so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoaderStats {
    /// Calls to `load`, including each key of `load_many`
    pub requests: u64,
    /// Requests that joined a key already pending in the open window
    pub deduplicated: u64,
    /// Requests answered from the per-coordinator cache
    pub cache_hits: u64,
    /// Executor invocations
    pub batches: u64,
    /// Keys sent to the executor across all batches
    pub keys_fetched: u64,
}

#[derive(Default)]
struct Counters {
    requests: AtomicU64,
    deduplicated: AtomicU64,
    cache_hits: AtomicU64,
    batches: AtomicU64,
    keys_fetched: AtomicU64,
}

impl Counters {
    fn bump(counter: &AtomicU64, by: u64) {
        counter.fetch_add(by, Ordering::Relaxed);
    }

    fn snapshot(&self) -> LoaderStats {
        LoaderStats {
            requests: self.requests.load(Ordering::Relaxed),
            deduplicated: self.deduplicated.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            batches: self.batches.load(Ordering::Relaxed),
            keys_fetched: self.keys_fetched.load(Ordering::Relaxed),
        }
    }
}

struct State<K, V, E> {
    window: Window<K, V, E>,
    next_window: u64,
    cache: HashMap<K, V>,
}

impl<K: Key, V, E> State<K, V, E> {
    /// Close the active window and open a fresh one in its place
    fn swap_window(&mut self) -> Window<K, V, E> {
        let fresh = Window::new(self.next_window);
        self.next_window += 1;
        std::mem::replace(&mut self.window, fresh)
    }
}

struct Shared<K: Key, F: BatchFn<K>> {
    batch_fn: F,
    config: LoaderConfig,
    state: Mutex<State<K, F::Value, F::Error>>,
    cancel: CancellationToken,
    counters: Counters,
}

impl<K: Key, F: BatchFn<K>> Shared<K, F> {
    fn enqueue(self: &Arc<Self>, key: K) -> oneshot::Receiver<LoadResult<F::Value, F::Error>> {
        let (tx, rx) = oneshot::channel();
        Counters::bump(&self.counters.requests, 1);

        let mut state = self.state.lock();
        if self.cancel.is_cancelled() {
            let _ = tx.send(Err(LoadError::Cancelled));
            return rx;
        }

        if self.config.cache {
            if let Some(value) = state.cache.get(&key) {
                Counters::bump(&self.counters.cache_hits, 1);
                let _ = tx.send(Ok(value.clone()));
                return rx;
            }
        }

        let opened = state.window.is_empty();
        if !state.window.push(key, tx) {
            Counters::bump(&self.counters.deduplicated, 1);
        }

        if state.window.len() >= self.config.max_batch_size {
            let window = state.swap_window();
            drop(state);
            tracing::debug!(window = window.id(), "Load window full, dispatching");
            let shared = Arc::clone(self);
            tokio::spawn(async move { shared.dispatch(window).await });
        } else if opened {
            let window_id = state.window.id();
            drop(state);
            tracing::debug!(window = window_id, "Load window opened");
            self.schedule_flush(window_id);
        }

        rx
    }

    fn schedule_flush(self: &Arc<Self>, window_id: u64) {
        let shared = Arc::clone(self);
        tokio::spawn(async move {
            tokio::select! {
                _ = shared.cancel.cancelled() => shared.cancel_open_window(),
                _ = settle(shared.config.delay) => {
                    if let Some(window) = shared.close_window(Some(window_id)) {
                        shared.dispatch(window).await;
                    }
                }
            }
        });
    }

    /// Take the active window if it holds keys and, when given, has the expected id
    fn close_window(&self, expected: Option<u64>) -> Option<Window<K, F::Value, F::Error>> {
        let mut state = self.state.lock();
        if state.window.is_empty() {
            return None;
        }
        if expected.is_some_and(|id| id != state.window.id()) {
            return None;
        }
        Some(state.swap_window())
    }

    async fn dispatch(&self, window: Window<K, F::Value, F::Error>) {
        let window_id = window.id();
        let keys = window.keys().to_vec();

        Counters::bump(&self.counters.batches, 1);
        Counters::bump(&self.counters.keys_fetched, keys.len() as u64);
        tracing::debug!(window = window_id, keys = keys.len(), "Dispatching load batch");

        let outcome = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => None,
            outcome = self.batch_fn.load(&keys) => Some(outcome),
        };

        let Some(outcome) = outcome else {
            let cancelled = cancel_window(window);
            tracing::debug!(window = window_id, cancelled, "Load batch cancelled in flight");
            return;
        };

        let report = distribute(window, outcome, self.config.cache);
        tracing::debug!(
            window = window_id,
            resolved = report.resolved,
            failed = report.failed,
            "Load batch distributed"
        );

        if self.config.cache && !report.values.is_empty() {
            self.state.lock().cache.extend(report.values);
        }
    }

    fn cancel_open_window(&self) {
        let window = self.state.lock().swap_window();
        if window.is_empty() {
            return;
        }
        let window_id = window.id();
        let cancelled = cancel_window(window);
        tracing::debug!(window = window_id, cancelled, "Load window cancelled");
    }
}

async fn settle(delay: Duration) {
    if delay.is_zero() {
        tokio::task::yield_now().await;
    } else {
        tokio::time::sleep(delay).await;
    }
}

async fn resolve<V, E>(slot: oneshot::Receiver<LoadResult<V, E>>) -> LoadResult<V, E> {
    slot.await.unwrap_or_else(|_| Err(LoadError::Cancelled))
}

/// Batching, deduplicating loader scoped to one external request
///
/// Create one per request and drop it when the request ends; dropping
/// cancels anything still pending. All methods that schedule work must run
/// inside a Tokio runtime.
pub struct LoadCoordinator<K: Key, F: BatchFn<K>> {
    shared: Arc<Shared<K, F>>,
}

impl<K: Key, F: BatchFn<K>> LoadCoordinator<K, F> {
    /// Create a coordinator with the default configuration
    pub fn new(batch_fn: F) -> Self {
        Self::with_config(batch_fn, LoaderConfig::default())
    }

    pub fn with_config(batch_fn: F, config: LoaderConfig) -> Self {
        Self::build(batch_fn, config, CancellationToken::new())
    }

    /// Create a coordinator that is cancelled together with `parent`
    pub fn with_parent_token(
        batch_fn: F,
        config: LoaderConfig,
        parent: &CancellationToken,
    ) -> Self {
        Self::build(batch_fn, config, parent.child_token())
    }

    fn build(batch_fn: F, config: LoaderConfig, cancel: CancellationToken) -> Self {
        let config = LoaderConfig {
            max_batch_size: config.max_batch_size.max(1),
            ..config
        };
        Self {
            shared: Arc::new(Shared {
                batch_fn,
                config,
                state: Mutex::new(State {
                    window: Window::new(0),
                    next_window: 1,
                    cache: HashMap::new(),
                }),
                cancel,
                counters: Counters::default(),
            }),
        }
    }

    /// Request the value for `key`
    ///
    /// The key is buffered immediately, before the returned future is polled,
    /// so every call made in the same breath lands in the same window.
    pub fn load(
        &self,
        key: K,
    ) -> impl Future<Output = LoadResult<F::Value, F::Error>> + Send + 'static {
        resolve(self.shared.enqueue(key))
    }

    /// Request several keys at once; results follow the order of `keys`
    pub fn load_many<I>(
        &self,
        keys: I,
    ) -> impl Future<Output = Vec<LoadResult<F::Value, F::Error>>> + Send
    where
        I: IntoIterator<Item = K>,
    {
        let slots: Vec<_> = keys.into_iter().map(|key| self.shared.enqueue(key)).collect();
        join_all(slots.into_iter().map(resolve))
    }

    /// Close the open window now and wait until its callers are resolved
    ///
    /// Does nothing when no keys are buffered.
    pub async fn flush(&self) {
        if let Some(window) = self.shared.close_window(None) {
            self.shared.dispatch(window).await;
        }
    }

    /// Resolve every outstanding request with [`LoadError::Cancelled`]
    ///
    /// Batches already in flight have their results discarded. Later calls
    /// to `load` fail immediately.
    pub fn cancel(&self) {
        self.shared.cancel.cancel();
        self.shared.cancel_open_window();
    }

    pub fn is_cancelled(&self) -> bool {
        self.shared.cancel.is_cancelled()
    }

    /// Seed the cache with a known value (no effect unless caching is enabled)
    pub fn prime(&self, key: K, value: F::Value) {
        if self.shared.config.cache {
            self.shared.state.lock().cache.insert(key, value);
        }
    }

    /// Forget a cached value so the next request fetches it again
    pub fn clear(&self, key: &K) {
        self.shared.state.lock().cache.remove(key);
    }

    pub fn clear_all(&self) {
        self.shared.state.lock().cache.clear();
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.shared.config
    }

    pub fn stats(&self) -> LoaderStats {
        self.shared.counters.snapshot()
    }
}

impl<K: Key, F: BatchFn<K>> Drop for LoadCoordinator<K, F> {
    fn drop(&mut self) {
        self.cancel();
    }
}
