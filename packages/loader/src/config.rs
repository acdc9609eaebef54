//! Coordinator tuning

use std::time::Duration;

/// Default time a window stays open after its first key arrives
pub const DEFAULT_DELAY: Duration = Duration::from_millis(1);

/// Default upper bound on unique keys per bulk fetch
pub const DEFAULT_MAX_BATCH_SIZE: usize = 1000;

/// Settings for one [`LoadCoordinator`](crate::LoadCoordinator)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderConfig {
    /// How long a window stays open after its first key
    ///
    /// A zero delay closes the window after a single scheduler yield, which
    /// only captures sibling requests on a current-thread runtime.
    pub delay: Duration,

    /// A window closes as soon as it holds this many unique keys
    pub max_batch_size: usize,

    /// Remember successful values for the coordinator's lifetime
    pub cache: bool,
}

impl LoaderConfig {
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set the batch size limit (values below 1 are raised to 1)
    pub fn max_batch_size(mut self, max_batch_size: usize) -> Self {
        self.max_batch_size = max_batch_size.max(1);
        self
    }

    pub fn cache(mut self, cache: bool) -> Self {
        self.cache = cache;
        self
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DELAY,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
            cache: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoaderConfig::default();
        assert_eq!(config.delay, Duration::from_millis(1));
        assert_eq!(config.max_batch_size, 1000);
        assert!(!config.cache);
    }

    #[test]
    fn test_max_batch_size_is_at_least_one() {
        let config = LoaderConfig::default().max_batch_size(0);
        assert_eq!(config.max_batch_size, 1);
    }
}
