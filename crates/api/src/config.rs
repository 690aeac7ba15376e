//! Process configuration read from environment variables.
//!
//! Unset and empty variables both fall back to their defaults. Values that are
//! present but unparseable are rejected at startup.

use std::net::{Ipv4Addr, SocketAddr};
use std::str::FromStr;

use thiserror::Error;

use duenos_auth::StaticCredentialStore;
use duenos_infra::db::DatabaseSettings;

const DEV_JWT_SECRET: &str = "dev-secret";
const DEV_LOGIN_USERNAME: &str = "admin";
const DEV_LOGIN_PASSWORD: &str = "1234";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub database: DatabaseSettings,
    pub jwt_secret: String,
    pub token_ttl: chrono::Duration,
    pub login_username: String,
    pub login_password: String,
    pub port: u16,
    /// Allowed CORS origin; `*` allows any origin.
    pub allowed_origin: String,
}

impl core::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("database", &self.database)
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("login_username", &self.login_username)
            .field("login_password", &"<redacted>")
            .field("port", &self.port)
            .field("allowed_origin", &self.allowed_origin)
            .finish()
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database = DatabaseSettings {
            host: get("DB_HOST").unwrap_or_else(|| "localhost".to_string()),
            port: parse_or(&get, "DB_PORT", 5432)?,
            user: get("DB_USER").unwrap_or_else(|| "postgres".to_string()),
            password: lookup("DB_PASSWORD").unwrap_or_default(),
            name: get("DB_NAME").unwrap_or_else(|| "duenos".to_string()),
            max_connections: parse_or(&get, "DB_MAX_CONNECTIONS", 5)?,
        };

        let jwt_secret = get("JWT_SECRET").unwrap_or_else(|| {
            tracing::warn!("JWT_SECRET not set; using insecure dev default");
            DEV_JWT_SECRET.to_string()
        });

        let expiry_secs: i64 = parse_or(&get, "JWT_EXPIRY_SECS", 3600)?;
        if expiry_secs <= 0 {
            return Err(ConfigError::Invalid {
                key: "JWT_EXPIRY_SECS",
                value: expiry_secs.to_string(),
                reason: "must be positive".to_string(),
            });
        }

        let (login_username, login_password) =
            match (get("LOGIN_USERNAME"), get("LOGIN_PASSWORD")) {
                (Some(user), Some(password)) => (user, password),
                _ => {
                    tracing::warn!(
                        "LOGIN_USERNAME/LOGIN_PASSWORD not set; using development credentials"
                    );
                    (DEV_LOGIN_USERNAME.to_string(), DEV_LOGIN_PASSWORD.to_string())
                }
            };

        Ok(Self {
            database,
            jwt_secret,
            token_ttl: chrono::Duration::seconds(expiry_secs),
            login_username,
            login_password,
            port: parse_or(&get, "PORT", 3000)?,
            allowed_origin: get("FRONTEND_URL").unwrap_or_else(|| "*".to_string()),
        })
    }

    pub fn credential_store(&self) -> StaticCredentialStore {
        StaticCredentialStore::new().with_user(&self.login_username, &self.login_password)
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

fn parse_or<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: core::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value: raw,
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use duenos_auth::CredentialStore;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.database.user, "postgres");
        assert_eq!(config.database.password, "");
        assert_eq!(config.database.name, "duenos");
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.jwt_secret, "dev-secret");
        assert_eq!(config.token_ttl, chrono::Duration::hours(1));
        assert_eq!(config.port, 3000);
        assert_eq!(config.allowed_origin, "*");
        assert!(config.credential_store().verify("admin", "1234"));
    }

    #[test]
    fn empty_values_fall_back_to_defaults() {
        let config = config_from(&[("PORT", ""), ("DB_HOST", "  ")]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.database.host, "localhost");
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = config_from(&[
            ("DB_HOST", "db"),
            ("DB_PORT", "6543"),
            ("DB_PASSWORD", "s3cret"),
            ("JWT_SECRET", "prod"),
            ("JWT_EXPIRY_SECS", "60"),
            ("LOGIN_USERNAME", "caja"),
            ("LOGIN_PASSWORD", "pw"),
            ("PORT", "8080"),
            ("FRONTEND_URL", "https://app.example.com"),
        ])
        .unwrap();

        assert_eq!(config.database.host, "db");
        assert_eq!(config.database.port, 6543);
        assert_eq!(config.database.password, "s3cret");
        assert_eq!(config.jwt_secret, "prod");
        assert_eq!(config.token_ttl, chrono::Duration::seconds(60));
        assert_eq!(config.listen_addr().port(), 8080);
        assert_eq!(config.allowed_origin, "https://app.example.com");

        let store = config.credential_store();
        assert!(store.verify("caja", "pw"));
        assert!(!store.verify("admin", "1234"));
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        let err = config_from(&[("PORT", "http")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));

        let err = config_from(&[("JWT_EXPIRY_SECS", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "JWT_EXPIRY_SECS", .. }));
    }

    #[test]
    fn debug_redacts_secrets() {
        let config = config_from(&[("JWT_SECRET", "topsecret"), ("DB_PASSWORD", "pw")]).unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("topsecret"));
        assert!(rendered.contains("<redacted>"));
    }
}
