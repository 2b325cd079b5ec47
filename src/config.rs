use std::{env, net::SocketAddr};

use chrono::Duration;
use thiserror::Error;

const DEFAULT_DATABASE_URL: &str = "sqlite://todo.db";
const DEFAULT_SERVER_ADDR: &str = "127.0.0.1:8000";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
const DEFAULT_TOKEN_TTL_HOURS: i64 = 12;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Process-wide settings, read once at startup.
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub signing_key: String,
    pub token_ttl: Duration,
    pub server_addr: SocketAddr,
    pub cors_origin: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests don't have to touch the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let signing_key = lookup("SIGNING_KEY")
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::Missing("SIGNING_KEY"))?;

        let token_ttl = match lookup("TOKEN_TTL_HOURS") {
            Some(value) => value
                .parse::<i64>()
                .ok()
                .filter(|hours| *hours > 0)
                .and_then(Duration::try_hours)
                .ok_or(ConfigError::Invalid {
                    name: "TOKEN_TTL_HOURS",
                    value,
                })?,
            None => Duration::hours(DEFAULT_TOKEN_TTL_HOURS),
        };

        let server_addr = lookup("SERVER_ADDR").unwrap_or_else(|| DEFAULT_SERVER_ADDR.to_string());
        let server_addr = server_addr
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::Invalid {
                name: "SERVER_ADDR",
                value: server_addr.clone(),
            })?;

        Ok(Config {
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            signing_key,
            token_ttl,
            server_addr,
            cors_origin: lookup("CORS_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_signing_key_is_set() {
        let config = Config::from_lookup(lookup_from(&[("SIGNING_KEY", "secret")])).unwrap();

        assert_eq!(config.signing_key, "secret");
        assert_eq!(config.token_ttl, Duration::hours(12));
        assert_eq!(config.database_url, "sqlite://todo.db");
        assert_eq!(config.server_addr, "127.0.0.1:8000".parse().unwrap());
        assert_eq!(config.cors_origin, "http://localhost:3000");
    }

    #[test]
    fn missing_signing_key_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[])).err().unwrap();
        assert!(matches!(err, ConfigError::Missing("SIGNING_KEY")));

        let err = Config::from_lookup(lookup_from(&[("SIGNING_KEY", "")])).err().unwrap();
        assert!(matches!(err, ConfigError::Missing("SIGNING_KEY")));
    }

    #[test]
    fn token_ttl_must_be_positive() {
        for bad in ["0", "-3", "twelve"] {
            let err = Config::from_lookup(lookup_from(&[
                ("SIGNING_KEY", "secret"),
                ("TOKEN_TTL_HOURS", bad),
            ]))
            .err()
            .unwrap();
            assert!(matches!(err, ConfigError::Invalid { name: "TOKEN_TTL_HOURS", .. }));
        }

        let config = Config::from_lookup(lookup_from(&[
            ("SIGNING_KEY", "secret"),
            ("TOKEN_TTL_HOURS", "1"),
        ]))
        .unwrap();
        assert_eq!(config.token_ttl, Duration::hours(1));
    }

    #[test]
    fn bad_server_addr_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            ("SIGNING_KEY", "secret"),
            ("SERVER_ADDR", "localhost"),
        ]))
        .err()
        .unwrap();
        assert!(matches!(err, ConfigError::Invalid { name: "SERVER_ADDR", .. }));
    }
}
