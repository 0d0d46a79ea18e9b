//! Load settings from the process environment (and `.env`, if present).

use crate::config::types::{ReferencePolicy, Settings};
use crate::error::ConfigError;
use std::str::FromStr;

impl Settings {
    /// Read settings from environment variables, loading `.env` first.
    ///
    /// | Variable           | Default              |
    /// |--------------------|----------------------|
    /// | `DATABASE_URL`     | `sqlite://movies.db` |
    /// | `HOST`             | `127.0.0.1`          |
    /// | `PORT`             | `5000`               |
    /// | `BODY_LIMIT_BYTES` | `65536`              |
    /// | `REFERENCE_POLICY` | `ignore`             |
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Missing keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Settings::default();
        Ok(Settings {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or("PORT", lookup("PORT"), defaults.port)?,
            body_limit_bytes: parse_or(
                "BODY_LIMIT_BYTES",
                lookup("BODY_LIMIT_BYTES"),
                defaults.body_limit_bytes,
            )?,
            reference_policy: match lookup("REFERENCE_POLICY") {
                Some(v) => v.parse::<ReferencePolicy>()?,
                None => defaults.reference_policy,
            },
        })
    }
}

fn parse_or<T: FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        None => Ok(default),
    }
}
