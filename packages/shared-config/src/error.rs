//! Errors raised while reading service settings from the environment

use thiserror::Error;

/// A setting that is absent, unparsable, or inconsistent with its neighbours
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable without a default was not set (or set to an empty string)
    #[error("{0} must be set")]
    Missing(&'static str),

    /// A variable was set but its value could not be parsed
    #[error("{name}={value:?} is not valid: {reason}")]
    Unparsable {
        name: &'static str,
        value: String,
        reason: String,
    },

    /// `DATABASE_URL` does not point at PostgreSQL
    #[error("DATABASE_URL must start with postgres:// or postgresql://")]
    NotPostgres,

    /// Pool bounds sqlx would reject or quietly adjust
    #[error("database pool bounds are inconsistent: min {min}, max {max}")]
    PoolBounds { min: u32, max: u32 },

    /// A loader window that could never hold a key
    #[error("LOADER_MAX_BATCH_SIZE must be at least 1")]
    EmptyBatch,

    /// `ENVIRONMENT` names no known deployment mode
    #[error("unknown ENVIRONMENT {0:?} (expected development, staging or production)")]
    UnknownEnvironment(String),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
