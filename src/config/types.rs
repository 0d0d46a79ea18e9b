//! Runtime settings and the delete policy for referenced rows.

use crate::error::ConfigError;
use std::str::FromStr;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://movies.db";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 64 * 1024;

/// What deleting a Director or Genre does to the movies that reference it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReferencePolicy {
    /// Delete the row and leave `director_id` / `genre_id` dangling on movies.
    #[default]
    Ignore,
    /// Refuse the delete while any movie references the row.
    Restrict,
    /// Clear the foreign key on referencing movies, then delete.
    Nullify,
    /// Delete referencing movies together with the row.
    Cascade,
}

impl FromStr for ReferencePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ignore" => Ok(ReferencePolicy::Ignore),
            "restrict" => Ok(ReferencePolicy::Restrict),
            "nullify" => Ok(ReferencePolicy::Nullify),
            "cascade" => Ok(ReferencePolicy::Cascade),
            _ => Err(ConfigError::InvalidValue {
                key: "REFERENCE_POLICY",
                value: s.to_string(),
            }),
        }
    }
}

/// Server settings. See [`Settings::from_env`] for the variables read.
#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub body_limit_bytes: usize,
    pub reference_policy: ReferencePolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            database_url: DEFAULT_DATABASE_URL.into(),
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
            reference_policy: ReferencePolicy::default(),
        }
    }
}
