//! Server configuration, read from the environment.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `RATINGS_HOST` | `127.0.0.1` | bind host |
//! | `RATINGS_PORT` | `8000` | bind port |
//! | `RATINGS_DATABASE` | `ratings.sqlite` | SQLite database file |
//! | `RATINGS_FIXTURE` | unset | reference-data JSON applied at startup |
//! | `RATINGS_TOKEN_TTL_SECS` | unset | login token lifetime; unset means tokens never expire |
//!
//! Logging is configured separately through `RUST_LOG`.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got `{value}`")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub fixture_path: Option<PathBuf>,
    pub token_ttl: Option<Duration>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            database_path: PathBuf::from("ratings.sqlite"),
            fixture_path: None,
            token_ttl: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from any variable source; unset or empty
    /// variables fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let port = match get("RATINGS_PORT") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "RATINGS_PORT",
                expected: "a port number",
                value,
            })?,
            None => defaults.port,
        };
        let token_ttl = match get("RATINGS_TOKEN_TTL_SECS") {
            Some(value) => Some(Duration::from_secs(value.trim().parse().map_err(|_| {
                ConfigError::Invalid {
                    name: "RATINGS_TOKEN_TTL_SECS",
                    expected: "a number of seconds",
                    value,
                }
            })?)),
            None => defaults.token_ttl,
        };

        Ok(Self {
            host: get("RATINGS_HOST").unwrap_or(defaults.host),
            port,
            database_path: get("RATINGS_DATABASE").map_or(defaults.database_path, PathBuf::from),
            fixture_path: get("RATINGS_FIXTURE").map(PathBuf::from),
            token_ttl,
        })
    }
}
