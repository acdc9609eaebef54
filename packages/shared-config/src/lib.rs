//! Environment-driven settings for the Bookstore API
//!
//! Each concern reads its own variables ([`DatabaseConfig`],
//! [`LoaderSettings`], [`Environment`]); [`ServiceConfig`] loads them
//! together and reports the first bad setting as a [`ConfigError`].

mod database;
mod environment;
mod error;
mod loader;
pub mod vars;

#[cfg(test)]
mod test_env;

pub use database::DatabaseConfig;
pub use environment::Environment;
pub use error::{ConfigError, ConfigResult};
pub use loader::LoaderSettings;

/// Everything the API needs from the environment besides HTTP settings
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub database: DatabaseConfig,
    pub loader: LoaderSettings,
    pub environment: Environment,
}

impl ServiceConfig {
    pub fn from_env() -> ConfigResult<Self> {
        Ok(Self {
            environment: Environment::from_env()?,
            database: DatabaseConfig::from_env()?,
            loader: LoaderSettings::from_env()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_env::EnvGuard;

    #[test]
    fn test_first_bad_setting_is_reported() {
        let _env = EnvGuard::with(
            &[("ENVIRONMENT", "staging"), ("LOADER_MAX_BATCH_SIZE", "0")],
            &["DATABASE_URL", "DATABASE_MAX_CONNECTIONS", "DATABASE_MIN_CONNECTIONS"],
        );

        assert_eq!(ServiceConfig::from_env().unwrap_err(), ConfigError::EmptyBatch);
    }

    #[test]
    fn test_defaults_load() {
        let _env = EnvGuard::unset(&[
            "ENVIRONMENT",
            "DATABASE_URL",
            "DATABASE_MAX_CONNECTIONS",
            "DATABASE_MIN_CONNECTIONS",
            "LOADER_DELAY_MS",
            "LOADER_MAX_BATCH_SIZE",
            "LOADER_CACHE",
        ]);

        let config = ServiceConfig::from_env().unwrap();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.loader, LoaderSettings::default());
        assert!(config.database.url.starts_with("postgres://"));
    }
}
