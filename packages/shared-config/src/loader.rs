//! Request loader tuning

use crate::{vars, ConfigError, ConfigResult};

/// Tuning for the per-request batching loaders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderSettings {
    /// How long a batching window stays open, in milliseconds (0 = one scheduler yield)
    pub delay_ms: u64,

    /// Maximum number of unique keys per bulk fetch
    pub max_batch_size: usize,

    /// Remember loaded values for the rest of the request
    pub cache: bool,
}

impl LoaderSettings {
    /// Read `LOADER_DELAY_MS`, `LOADER_MAX_BATCH_SIZE` and `LOADER_CACHE`
    pub fn from_env() -> ConfigResult<Self> {
        let defaults = Self::default();
        let settings = Self {
            delay_ms: vars::parse_or("LOADER_DELAY_MS", defaults.delay_ms)?,
            max_batch_size: vars::parse_or("LOADER_MAX_BATCH_SIZE", defaults.max_batch_size)?,
            cache: vars::flag_or("LOADER_CACHE", defaults.cache)?,
        };
        if settings.max_batch_size == 0 {
            return Err(ConfigError::EmptyBatch);
        }
        Ok(settings)
    }
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            delay_ms: 1,
            max_batch_size: 1000,
            cache: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_env::EnvGuard;

    const VARS: [&str; 3] = ["LOADER_DELAY_MS", "LOADER_MAX_BATCH_SIZE", "LOADER_CACHE"];

    #[test]
    fn test_unset_uses_defaults() {
        let _env = EnvGuard::unset(&VARS);
        assert_eq!(LoaderSettings::from_env(), Ok(LoaderSettings::default()));
    }

    #[test]
    fn test_reads_overrides() {
        let _env = EnvGuard::set(&[
            ("LOADER_DELAY_MS", "5"),
            ("LOADER_MAX_BATCH_SIZE", "250"),
            ("LOADER_CACHE", "yes"),
        ]);

        assert_eq!(
            LoaderSettings::from_env(),
            Ok(LoaderSettings {
                delay_ms: 5,
                max_batch_size: 250,
                cache: true,
            })
        );
    }

    #[test]
    fn test_unparsable_batch_size() {
        let _env = EnvGuard::with(&[("LOADER_MAX_BATCH_SIZE", "many")], &["LOADER_DELAY_MS"]);

        assert!(matches!(
            LoaderSettings::from_env(),
            Err(ConfigError::Unparsable { name: "LOADER_MAX_BATCH_SIZE", .. })
        ));
    }

    #[test]
    fn test_zero_batch_size_is_rejected() {
        let _env = EnvGuard::with(&[("LOADER_MAX_BATCH_SIZE", "0")], &["LOADER_DELAY_MS"]);
        assert_eq!(LoaderSettings::from_env(), Err(ConfigError::EmptyBatch));
    }
}
