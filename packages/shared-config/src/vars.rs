//! Typed access to environment variables
//!
//! Empty values are treated as unset, so `FOO=` in a `.env` file falls back
//! to the default instead of failing to parse.

use std::env;
use std::str::FromStr;

use crate::{ConfigError, ConfigResult};

/// Value of `name`, or `None` when it is unset or empty
pub fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Value of `name`; unset or empty is an error
pub fn required(name: &'static str) -> ConfigResult<String> {
    optional(name).ok_or(ConfigError::Missing(name))
}

/// Parse `name` into `T`, falling back to `default` when unset
pub fn parse_or<T>(name: &'static str, default: T) -> ConfigResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match optional(name) {
        Some(value) => {
            let parsed = value.trim().parse::<T>();
            parsed.map_err(|e| ConfigError::Unparsable {
                name,
                reason: e.to_string(),
                value,
            })
        }
        None => Ok(default),
    }
}

/// Read a boolean switch such as `LOADER_CACHE`
///
/// Accepts `true/false`, `1/0`, `yes/no` and `on/off` in any case.
pub fn flag_or(name: &'static str, default: bool) -> ConfigResult<bool> {
    let Some(value) = optional(name) else {
        return Ok(default);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Unparsable {
            name,
            value,
            reason: "expected a boolean".to_string(),
        }),
    }
}
