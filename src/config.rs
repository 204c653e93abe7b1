//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to automatically deserialize environment variables into a type-safe struct.

use chrono::Duration;
use serde::Deserialize;

/// Longest accepted token lifetime: one year.
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365;

/// Failure to load or validate configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read environment: {0}")]
    Env(#[from] envy::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `JWT_SECRET` (required): HMAC secret used to sign bearer tokens
/// - `DATABASE_PATH` (optional): SQLite database file, defaults to `users.db`
/// - `PORT` (optional): HTTP server port, defaults to 3000
/// - `TOKEN_TTL_HOURS` (optional): token lifetime, defaults to 24
/// - `DATABASE_MAX_CONNECTIONS` (optional): pool size, defaults to 5
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub jwt_secret: String,

    #[serde(default = "default_database_path")]
    pub database_path: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,

    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,
}

fn default_database_path() -> String {
    "users.db".to_string()
}

/// Default port if PORT environment variable is not set.
fn default_port() -> u16 {
    3000
}

fn default_token_ttl_hours() -> i64 {
    24
}

fn default_max_connections() -> u32 {
    5
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and deserializes them into a Config struct.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required environment variables are missing (e.g., JWT_SECRET)
    /// - Environment variable values cannot be parsed into expected types
    /// - A value is out of range (e.g., TOKEN_TTL_HOURS <= 0)
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        // Field names are automatically converted: database_path -> DATABASE_PATH
        envy::from_env::<Config>()?.validated()
    }

    /// Deserialize and validate configuration from explicit key/value pairs.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars)?.validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::Invalid("JWT_SECRET must not be empty".into()));
        }
        if !(1..=MAX_TOKEN_TTL_HOURS).contains(&self.token_ttl_hours) {
            return Err(ConfigError::Invalid(format!(
                "TOKEN_TTL_HOURS must be between 1 and {MAX_TOKEN_TTL_HOURS}, got {}",
                self.token_ttl_hours
            )));
        }
        if self.database_max_connections == 0 {
            return Err(ConfigError::Invalid(
                "DATABASE_MAX_CONNECTIONS must be at least 1".into(),
            ));
        }
        Ok(self)
    }

    /// Bearer token lifetime.
    pub fn token_ttl(&self) -> Duration {
        // Range-checked in `validated`; the fallback only applies to hand-built configs
        Duration::try_hours(self.token_ttl_hours).unwrap_or_else(|| Duration::hours(24))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_apply_when_only_secret_is_set() {
        let config = Config::from_vars(vars(&[("JWT_SECRET", "s3cret")])).unwrap();

        assert_eq!(config.jwt_secret, "s3cret");
        assert_eq!(config.database_path, "users.db");
        assert_eq!(config.port, 3000);
        assert_eq!(config.token_ttl_hours, 24);
        assert_eq!(config.database_max_connections, 5);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = Config::from_vars(vars(&[
            ("JWT_SECRET", "s3cret"),
            ("DATABASE_PATH", "/tmp/points.db"),
            ("PORT", "8080"),
            ("TOKEN_TTL_HOURS", "1"),
        ]))
        .unwrap();

        assert_eq!(config.database_path, "/tmp/points.db");
        assert_eq!(config.port, 8080);
        assert_eq!(config.token_ttl_hours, 1);
    }

    #[test]
    fn missing_secret_is_an_error() {
        assert!(matches!(
            Config::from_vars(vars(&[("PORT", "8080")])),
            Err(ConfigError::Env(_))
        ));
    }

    #[test]
    fn out_of_range_token_ttl_is_rejected() {
        for ttl in ["0", "-1", "9223372036854775807"] {
            let err = Config::from_vars(vars(&[("JWT_SECRET", "x"), ("TOKEN_TTL_HOURS", ttl)]))
                .unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{ttl}: {err}");
        }

        let config =
            Config::from_vars(vars(&[("JWT_SECRET", "x"), ("TOKEN_TTL_HOURS", "8760")])).unwrap();
        assert_eq!(config.token_ttl(), Duration::hours(8760));
    }

    #[test]
    fn empty_secret_and_zero_pool_are_rejected() {
        assert!(matches!(
            Config::from_vars(vars(&[("JWT_SECRET", "")])),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::from_vars(vars(&[("JWT_SECRET", "x"), ("DATABASE_MAX_CONNECTIONS", "0")])),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn unparsable_port_is_an_error() {
        assert!(Config::from_vars(vars(&[("JWT_SECRET", "x"), ("PORT", "eighty")])).is_err());
    }
}
