//! Database connection pool wiring.
//!
//! The pool is created once at startup and handed to the stores explicitly;
//! nothing in this crate holds a global connection.

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};

/// Connection settings for the Postgres database holding the `dueno` table.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
}

impl core::fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

impl DatabaseSettings {
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
    }

    fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections.max(1))
            .acquire_timeout(Duration::from_secs(5))
    }
}

/// Build a pool without touching the network.
///
/// Connections are opened on first use, so an unreachable database surfaces
/// as per-request failures instead of preventing startup.
pub fn connect_lazy(settings: &DatabaseSettings) -> PgPool {
    settings
        .pool_options()
        .connect_lazy_with(settings.connect_options())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> DatabaseSettings {
        DatabaseSettings {
            host: "db.internal".into(),
            port: 5433,
            user: "api".into(),
            password: "hunter2".into(),
            name: "duenos".into(),
            max_connections: 4,
        }
    }

    #[test]
    fn debug_output_hides_password() {
        let rendered = format!("{:?}", settings());
        assert!(rendered.contains("db.internal"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn connect_options_carry_settings() {
        let opts = settings().connect_options();
        assert_eq!(opts.get_host(), "db.internal");
        assert_eq!(opts.get_port(), 5433);
        assert_eq!(opts.get_username(), "api");
        assert_eq!(opts.get_database(), Some("duenos"));
    }
}
