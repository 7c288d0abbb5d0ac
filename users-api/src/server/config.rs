//! HTTP server configuration object and helpers.

use std::net::{AddrParseError, IpAddr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use users_api::outbound::persistence::DbPool;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Configuration values controlling the HTTP listener and persistence.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USERS_API")]
pub struct Settings {
    /// Host address the listener binds to.
    pub host: Option<String>,
    /// TCP port the listener binds to.
    pub port: Option<u16>,
    /// PostgreSQL connection URL. When unset the server keeps user records
    /// in memory.
    pub database_url: Option<String>,
    /// Upper bound for pooled database connections.
    pub db_max_connections: Option<u32>,
}

impl Settings {
    /// Return the configured host, falling back to all interfaces.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Return the configured port, falling back to the default.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Return the configured database URL, treating blank values as unset.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Resolve the socket address the server should bind to.
    ///
    /// # Errors
    ///
    /// Returns [`AddrParseError`] when the configured host is not a valid IP
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        let host: IpAddr = self.host().parse()?;
        Ok(SocketAddr::new(host, self.port()))
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration for the given bind address.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
        }
    }

    /// Attach a database connection pool for the persistence adapter.
    ///
    /// When provided, the server serves `/api/users` from the Diesel-backed
    /// repository instead of the in-memory store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for configuration parsing and fallbacks.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> Settings {
        Settings::load_from_iter([OsString::from("users-api")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("USERS_API_HOST", None::<String>),
            ("USERS_API_PORT", None::<String>),
            ("USERS_API_DATABASE_URL", None::<String>),
            ("USERS_API_DB_MAX_CONNECTIONS", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.host(), DEFAULT_HOST);
        assert_eq!(settings.port(), DEFAULT_PORT);
        assert!(settings.database_url().is_none());
        assert!(settings.db_max_connections.is_none());
        assert_eq!(
            settings.bind_addr().expect("address should parse"),
            SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT))
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("USERS_API_HOST", Some("127.0.0.1".to_owned())),
            ("USERS_API_PORT", Some("9090".to_owned())),
            (
                "USERS_API_DATABASE_URL",
                Some("postgres://localhost/users".to_owned()),
            ),
            ("USERS_API_DB_MAX_CONNECTIONS", Some("25".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.host(), "127.0.0.1");
        assert_eq!(settings.port(), 9090);
        assert_eq!(settings.database_url(), Some("postgres://localhost/users"));
        assert_eq!(settings.db_max_connections, Some(25));
        assert_eq!(
            settings.bind_addr().expect("address should parse"),
            SocketAddr::from(([127, 0, 0, 1], 9090))
        );
    }

    #[rstest]
    fn blank_database_url_is_treated_as_unset() {
        let _guard = lock_env([("USERS_API_DATABASE_URL", Some("   ".to_owned()))]);

        let settings = load_from_empty_args();
        assert!(settings.database_url().is_none());
    }

    #[rstest]
    fn bind_addr_rejects_unparseable_host() {
        let _guard = lock_env([("USERS_API_HOST", Some("not-an-address".to_owned()))]);

        let settings = load_from_empty_args();
        assert!(settings.bind_addr().is_err());
    }
}
