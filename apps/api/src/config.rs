//! API server configuration

use std::time::Duration;

use anyhow::{Context, Result};
use bookstore_loader::LoaderConfig;
use bookstore_shared_config::{vars, DatabaseConfig, Environment, ServiceConfig};

/// API server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Database, loader and environment settings
    pub service: ServiceConfig,

    /// Server port (default: 8080)
    pub port: u16,

    /// CORS allowed origins (optional)
    pub cors_allowed_origins: Option<Vec<String>>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// In production mode `DATABASE_URL` must be set explicitly. In
    /// development/staging mode the local default database is used.
    pub fn from_env() -> Result<Self> {
        let service = ServiceConfig::from_env().context("Failed to load config")?;
        Self::check_production_database(&service)?;

        Ok(Self {
            port: vars::parse_or("PORT", 8080).context("Invalid PORT value")?,
            cors_allowed_origins: vars::optional("CORS_ORIGINS").map(|s| parse_origins(&s)),
            service,
        })
    }

    /// Production must never fall back to the local development database
    fn check_production_database(service: &ServiceConfig) -> Result<()> {
        anyhow::ensure!(
            !service.environment.is_production() || service.database.explicit_url,
            "DATABASE_URL environment variable is required in production. \
             Please set your PostgreSQL connection string."
        );
        Ok(())
    }

    /// Get database configuration
    pub fn database(&self) -> &DatabaseConfig {
        &self.service.database
    }

    /// Build the per-request loader configuration
    pub fn loader_config(&self) -> LoaderConfig {
        let settings = &self.service.loader;
        LoaderConfig::default()
            .delay(Duration::from_millis(settings.delay_ms))
            .max_batch_size(settings.max_batch_size)
            .cache(settings.cache)
    }

    /// Get environment mode
    pub fn environment(&self) -> Environment {
        self.service.environment
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.service.environment.is_production()
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
