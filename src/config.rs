use sea_orm::ConnectOptions;
use std::env;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{key} has an invalid value `{value}`")]
    Invalid { key: &'static str, value: String },
}

/// Runtime settings for the CV store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
}

impl AppConfig {
    pub const DEFAULT_MAX_CONNECTIONS: u32 = 50;
    pub const DEFAULT_MIN_CONNECTIONS: u32 = 10;
    pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;
    pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 300;

    /// Loads `.env.{RUST_ENV}` (falling back to `.env`) and then reads the
    /// process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let rust_env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());

        // Try .env.{environment} first, then fall back to .env
        let env_file = format!(".env.{}", rust_env);
        if dotenvy::from_filename(&env_file).is_err() {
            dotenvy::dotenv().ok();
        }
        info!(environment = %rust_env, "Configuration loaded");

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let max_connections = parse_or(
            &lookup,
            "DB_MAX_CONNECTIONS",
            Self::DEFAULT_MAX_CONNECTIONS,
        )?;
        let min_connections = parse_or(
            &lookup,
            "DB_MIN_CONNECTIONS",
            Self::DEFAULT_MIN_CONNECTIONS,
        )?;
        if min_connections > max_connections {
            return Err(ConfigError::Invalid {
                key: "DB_MIN_CONNECTIONS",
                value: min_connections.to_string(),
            });
        }

        Ok(Self {
            database_url,
            max_connections,
            min_connections,
            connect_timeout: Duration::from_secs(parse_or(
                &lookup,
                "DB_CONNECT_TIMEOUT_SECS",
                Self::DEFAULT_CONNECT_TIMEOUT_SECS,
            )?),
            idle_timeout: Duration::from_secs(parse_or(
                &lookup,
                "DB_IDLE_TIMEOUT_SECS",
                Self::DEFAULT_IDLE_TIMEOUT_SECS,
            )?),
        })
    }

    pub fn connect_options(&self) -> ConnectOptions {
        let mut opt = ConnectOptions::new(self.database_url.clone());
        opt.max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(self.connect_timeout)
            .acquire_timeout(self.connect_timeout)
            .idle_timeout(self.idle_timeout)
            .sqlx_logging(false);
        opt
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_apply_when_only_url_is_set() {
        let config =
            AppConfig::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://localhost/cv")]))
                .unwrap();

        assert_eq!(config.database_url, "postgres://localhost/cv");
        assert_eq!(config.max_connections, AppConfig::DEFAULT_MAX_CONNECTIONS);
        assert_eq!(config.min_connections, AppConfig::DEFAULT_MIN_CONNECTIONS);
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.idle_timeout, Duration::from_secs(300));
    }

    #[test]
    fn test_missing_database_url() {
        let result = AppConfig::from_lookup(lookup_from(&[]));
        assert_eq!(result, Err(ConfigError::Missing("DATABASE_URL")));

        let result = AppConfig::from_lookup(lookup_from(&[("DATABASE_URL", "")]));
        assert_eq!(result, Err(ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn test_pool_overrides_are_parsed() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db/cv"),
            ("DB_MAX_CONNECTIONS", "8"),
            ("DB_MIN_CONNECTIONS", "2"),
            ("DB_CONNECT_TIMEOUT_SECS", "1"),
            ("DB_IDLE_TIMEOUT_SECS", "60"),
        ]))
        .unwrap();

        assert_eq!(config.max_connections, 8);
        assert_eq!(config.min_connections, 2);
        assert_eq!(config.connect_timeout, Duration::from_secs(1));
        assert_eq!(config.idle_timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_invalid_number_is_reported_with_key() {
        let result = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db/cv"),
            ("DB_MAX_CONNECTIONS", "lots"),
        ]));

        assert_eq!(
            result,
            Err(ConfigError::Invalid {
                key: "DB_MAX_CONNECTIONS",
                value: "lots".to_string(),
            })
        );
    }

    #[test]
    fn test_min_above_max_is_rejected() {
        let result = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db/cv"),
            ("DB_MAX_CONNECTIONS", "4"),
            ("DB_MIN_CONNECTIONS", "5"),
        ]));

        assert!(matches!(
            result,
            Err(ConfigError::Invalid { key: "DB_MIN_CONNECTIONS", .. })
        ));
    }

    #[test]
    fn test_connect_options_carry_url() {
        let config =
            AppConfig::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://db/cv")])).unwrap();

        let opt = config.connect_options();

        assert_eq!(opt.get_url(), "postgres://db/cv");
        assert_eq!(opt.get_max_connections(), Some(50));
        assert_eq!(opt.get_min_connections(), Some(10));
    }
}
