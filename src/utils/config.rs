use chrono::Duration;
use std::env;
use thiserror::Error;

/// Upper bound for `JWT_EXPIRES_MINUTES`: one week.
const MAX_EXPIRES_MINUTES: i64 = 7 * 24 * 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is not valid: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Which persistence backend `DATABASE_URL` points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Mongo(String),
    Memory,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl: Duration,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub store: StoreBackend,
    pub jwt: JwtConfig,
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    /// Reads configuration from the process environment (after `.env` is loaded).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &'static str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let port_raw = var("PORT", "3333");
        let port = port_raw
            .parse::<u16>()
            .map_err(|_| ConfigError::Invalid { name: "PORT", value: port_raw.clone() })?;

        let expires_raw = var("JWT_EXPIRES_MINUTES", "15");
        let ttl = expires_raw
            .parse::<i64>()
            .ok()
            .filter(|m| (1..=MAX_EXPIRES_MINUTES).contains(m))
            .and_then(Duration::try_minutes)
            .ok_or(ConfigError::Invalid { name: "JWT_EXPIRES_MINUTES", value: expires_raw.clone() })?;

        let database_url = required("DATABASE_URL")?;
        let store = if database_url.starts_with("memory://") {
            StoreBackend::Memory
        } else if database_url.starts_with("mongodb://") || database_url.starts_with("mongodb+srv://") {
            StoreBackend::Mongo(database_url)
        } else {
            return Err(ConfigError::Invalid { name: "DATABASE_URL", value: database_url });
        };

        let allowed_origins = var("ALLOWED_ORIGINS", "http://localhost:3000")
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(String::from)
            .collect();

        Ok(Self {
            host: var("HOST", "0.0.0.0"),
            port,
            store,
            jwt: JwtConfig {
                secret: required("JWT_SECRET")?,
                issuer: var("JWT_ISSUER", "bookmark-service"),
                audience: var("JWT_AUDIENCE", "bookmark-api"),
                ttl,
            },
            allowed_origins,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_required_vars_are_set() {
        let config = AppConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "memory://"),
            ("JWT_SECRET", "super-secret"),
        ]))
        .unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3333);
        assert_eq!(config.store, StoreBackend::Memory);
        assert_eq!(config.jwt.ttl, Duration::minutes(15));
        assert_eq!(config.jwt.issuer, "bookmark-service");
        assert_eq!(config.allowed_origins, vec!["http://localhost:3000".to_string()]);
    }

    #[test]
    fn mongo_url_and_origin_list() {
        let config = AppConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "mongodb://localhost:27017/bookmarks"),
            ("JWT_SECRET", "s"),
            ("PORT", "8080"),
            ("ALLOWED_ORIGINS", "http://a.test, http://b.test,"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(
            config.store,
            StoreBackend::Mongo("mongodb://localhost:27017/bookmarks".to_string())
        );
        assert_eq!(config.allowed_origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn missing_secret_is_reported() {
        let err = AppConfig::from_lookup(lookup(&[("DATABASE_URL", "memory://")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("JWT_SECRET"));
    }

    #[test]
    fn bad_numbers_and_schemes_are_rejected() {
        let err = AppConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "memory://"),
            ("JWT_SECRET", "s"),
            ("PORT", "eighty"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "PORT", .. }));

        let err = AppConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/db"),
            ("JWT_SECRET", "s"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "DATABASE_URL", .. }));

        for minutes in ["0", "-5", "10081", "9223372036854775807"] {
            let err = AppConfig::from_lookup(lookup(&[
                ("DATABASE_URL", "memory://"),
                ("JWT_SECRET", "s"),
                ("JWT_EXPIRES_MINUTES", minutes),
            ]))
            .unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { name: "JWT_EXPIRES_MINUTES", .. }));
        }
    }
}
