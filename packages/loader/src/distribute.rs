//! Result distribution from one bulk fetch back to every waiting caller
//!
//! Each waiter is a single-assignment slot, so sending consumes it. A slot
//! whose receiver has already gone away is skipped without touching others.

use crate::batch_fn::{BatchResult, Key};
use crate::buffer::{Waiter, Window};
use crate::error::{LoadError, LoadResult};

/// Summary of one distribution pass
#[derive(Debug)]
pub(crate) struct Distribution<K, V> {
    /// Callers that received a value
    pub resolved: usize,
    /// Callers that received an error
    pub failed: usize,
    /// Keys the executor left out of its result map
    pub missing: usize,
    /// Successful values, collected only when requested
    pub values: Vec<(K, V)>,
}

impl<K, V> Default for Distribution<K, V> {
    fn default() -> Self {
        Self {
            resolved: 0,
            failed: 0,
            missing: 0,
            values: Vec::new(),
        }
    }
}

fn fan_out<V, E>(waiters: Vec<Waiter<V, E>>, result: &LoadResult<V, E>) -> usize
where
    V: Clone,
    E: Clone,
{
    let count = waiters.len();
    for waiter in waiters {
        let _ = waiter.send(result.clone());
    }
    count
}

/// Resolve every waiter in `window` from the executor's `outcome`
pub(crate) fn distribute<K, V, E>(
    window: Window<K, V, E>,
    outcome: Result<BatchResult<K, V, E>, E>,
    keep_values: bool,
) -> Distribution<K, V>
where
    K: Key,
    V: Clone,
    E: Clone,
{
    let window_id = window.id();
    let (keys, mut waiters) = window.into_parts();
    let mut report = Distribution::default();
    let mut missing_keys = Vec::new();

    match outcome {
        Err(error) => {
            let result = Err(LoadError::Batch(error));
            for key in &keys {
                if let Some(list) = waiters.remove(key) {
                    report.failed += fan_out(list, &result);
                }
            }
        }
        Ok(mut results) => {
            for key in keys {
                let Some(list) = waiters.remove(&key) else {
                    continue;
                };
                match results.remove(&key) {
                    Some(Ok(value)) => {
                        report.resolved += fan_out(list, &Ok(value.clone()));
                        if keep_values {
                            report.values.push((key, value));
                        }
                    }
                    Some(Err(error)) => {
                        report.failed += fan_out(list, &Err(LoadError::Key(error)));
                    }
                    None => {
                        report.failed += fan_out(list, &Err(LoadError::Missing));
                        missing_keys.push(key);
                    }
                }
            }

            if !results.is_empty() {
                tracing::debug!(
                    window = window_id,
                    extra = results.len(),
                    "Ignoring results for keys that were not requested"
                );
            }
        }
    }

    if !missing_keys.is_empty() {
        report.missing = missing_keys.len();
        tracing::warn!(
            window = window_id,
            keys = ?missing_keys,
            "Batch executor omitted requested keys"
        );
    }

    report
}

/// Resolve every waiter in `window` with [`LoadError::Cancelled`]
pub(crate) fn cancel_window<K, V, E>(window: Window<K, V, E>) -> usize
where
    K: Key,
    V: Clone,
    E: Clone,
{
    let (_, waiters) = window.into_parts();
    let result = Err(LoadError::Cancelled);
    waiters
        .into_values()
        .map(|list| fan_out(list, &result))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch_fn::ok_map;
    use assert_matches::assert_matches;
    use tokio::sync::oneshot;

    type Rx = oneshot::Receiver<LoadResult<String, String>>;

    fn window_with(keys: &[u32]) -> (Window<u32, String, String>, Vec<(u32, Rx)>) {
        let mut window = Window::new(7);
        let mut receivers = Vec::new();
        for key in keys {
            let (tx, rx) = oneshot::channel();
            window.push(*key, tx);
            receivers.push((*key, rx));
        }
        (window, receivers)
    }

    #[test]
    fn test_shared_key_gets_same_value() {
        let (window, receivers) = window_with(&[1, 2, 1]);
        let outcome = Ok(ok_map([(1, "one".to_string()), (2, "two".to_string())]));

        let report = distribute(window, outcome, true);
        assert_eq!(report.resolved, 3);
        assert_eq!(report.failed, 0);
        assert_eq!(report.values.len(), 2);

        for (key, mut rx) in receivers {
            let value = rx.try_recv().expect("slot resolved").expect("value");
            let expected = if key == 1 { "one" } else { "two" };
            assert_eq!(value, expected);
        }
    }

    #[test]
    fn test_batch_error_reaches_every_caller() {
        let (window, receivers) = window_with(&[1, 2, 3, 2]);

        let report = distribute(window, Err("db down".to_string()), false);
        assert_eq!(report.failed, 4);
        assert!(report.values.is_empty());

        for (_, mut rx) in receivers {
            assert_matches!(
                rx.try_recv(),
                Ok(Err(LoadError::Batch(e))) if e == "db down"
            );
        }
    }

    #[test]
    fn test_missing_and_key_errors_are_isolated() {
        let (window, mut receivers) = window_with(&[1, 2, 3]);
        let mut results: BatchResult<u32, String, String> = ok_map([(1, "one".to_string())]);
        results.insert(2, Err("bad row".to_string()));

        let report = distribute(window, Ok(results), false);
        assert_eq!(report.resolved, 1);
        assert_eq!(report.failed, 2);
        assert_eq!(report.missing, 1);

        assert_matches!(receivers[0].1.try_recv(), Ok(Ok(v)) if v == "one");
        assert_matches!(receivers[1].1.try_recv(), Ok(Err(LoadError::Key(e))) if e == "bad row");
        assert_matches!(receivers[2].1.try_recv(), Ok(Err(LoadError::Missing)));
    }

    #[test]
    fn test_dropped_receiver_does_not_affect_others() {
        let (window, mut receivers) = window_with(&[1, 1]);
        drop(receivers.remove(0));

        let report = distribute(window, Ok(ok_map([(1, "one".to_string())])), false);
        assert_eq!(report.resolved, 2);
        assert_matches!(receivers[0].1.try_recv(), Ok(Ok(v)) if v == "one");
    }

    #[test]
    fn test_cancel_window() {
        let (window, receivers) = window_with(&[4, 5, 4]);

        assert_eq!(cancel_window(window), 3);
        for (_, mut rx) in receivers {
            assert_matches!(rx.try_recv(), Ok(Err(LoadError::Cancelled)));
        }
    }
}
