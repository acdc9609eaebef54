//! Deployment mode

use std::fmt;
use std::str::FromStr;

use crate::{vars, ConfigError, ConfigResult};

/// Where the service is running
///
/// Production tightens defaults: the API refuses to start without an
/// explicit `DATABASE_URL` and rejects cross-origin requests unless
/// `CORS_ORIGINS` lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    /// Read `ENVIRONMENT`, defaulting to development when unset
    ///
    /// An unrecognised value is an error so a typo never silently drops a
    /// production deployment into development mode.
    pub fn from_env() -> ConfigResult<Self> {
        vars::optional("ENVIRONMENT").map_or(Ok(Self::default()), |value| value.parse())
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "staging" | "stage" => Ok(Self::Staging),
            "development" | "dev" => Ok(Self::Development),
            _ => Err(ConfigError::UnknownEnvironment(s.to_string())),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Development => "development",
            Self::Staging => "staging",
            Self::Production => "production",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_env::EnvGuard;

    #[test]
    fn test_aliases() {
        assert_eq!("PROD".parse(), Ok(Environment::Production));
        assert_eq!("stage".parse(), Ok(Environment::Staging));
        assert_eq!(" dev ".parse(), Ok(Environment::Development));
    }

    #[test]
    fn test_typo_is_rejected() {
        assert_eq!(
            "prodution".parse::<Environment>(),
            Err(ConfigError::UnknownEnvironment("prodution".to_string()))
        );
    }

    #[test]
    fn test_unset_means_development() {
        let _env = EnvGuard::unset(&["ENVIRONMENT"]);
        assert_eq!(Environment::from_env(), Ok(Environment::Development));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let env = Environment::Staging;
        assert_eq!(env.to_string().parse(), Ok(env));
    }
}
