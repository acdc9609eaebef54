//! Serialized access to process environment for tests

use std::env;
use std::sync::{Mutex, MutexGuard};

// Tests in one binary share the process environment
static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Holds the environment lock and restores every touched variable on drop
pub struct EnvGuard {
    saved: Vec<(String, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvGuard {
    fn lock() -> MutexGuard<'static, ()> {
        // A failed test must not poison the lock for the rest of the run
        ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Set `vars` for the lifetime of the guard
    pub fn set(vars: &[(&str, &str)]) -> Self {
        let lock = Self::lock();
        let saved = vars
            .iter()
            .map(|(name, value)| {
                let old = env::var(name).ok();
                env::set_var(name, value);
                (name.to_string(), old)
            })
            .collect();
        Self { saved, _lock: lock }
    }

    /// Remove `names` for the lifetime of the guard
    pub fn unset(names: &[&str]) -> Self {
        let lock = Self::lock();
        let saved = names
            .iter()
            .map(|name| {
                let old = env::var(name).ok();
                env::remove_var(name);
                (name.to_string(), old)
            })
            .collect();
        Self { saved, _lock: lock }
    }

    /// Apply `vars` and remove `names` under a single lock
    pub fn with(vars: &[(&str, &str)], names: &[&str]) -> Self {
        let mut guard = Self::set(vars);
        for name in names {
            guard.saved.push((name.to_string(), env::var(name).ok()));
            env::remove_var(name);
        }
        guard
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (name, value) in self.saved.iter().rev() {
            match value {
                Some(value) => env::set_var(name, value),
                None => env::remove_var(name),
            }
        }
    }
}
