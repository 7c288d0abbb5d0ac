//! bb8-backed connection pooling for the Diesel adapter.
//!
//! [`DbPool`] owns a `bb8` pool of `AsyncPgConnection`s built through
//! `diesel-async`, so repository calls borrow a connection without blocking
//! the runtime. Construction and checkout failures surface as [`PoolError`]
//! values; the bb8 types themselves stay private to this module.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};

/// Errors raised while building the pool or borrowing a connection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// No connection could be checked out before the timeout elapsed.
    #[error("connection checkout failed: {message}")]
    Checkout { message: String },

    /// The pool itself could not be constructed.
    #[error("pool construction failed: {message}")]
    Build { message: String },
}

impl PoolError {
    /// Wrap a checkout failure.
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    /// Wrap a pool construction failure.
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

/// Tunables for [`DbPool::new`].
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use users_api::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("postgres://app:secret@db/users")
///     .with_max_connections(20)
///     .with_checkout_timeout(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_connections: u32,
    min_idle: Option<u32>,
    checkout_timeout: Duration,
}

impl PoolConfig {
    /// Upper connection bound applied when no override is configured.
    pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    /// Idle connections kept warm by default.
    pub const DEFAULT_MIN_IDLE: u32 = 2;
    /// Checkout wait bound applied when no override is configured.
    pub const DEFAULT_CHECKOUT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Start from the defaults with the given database URL.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: Self::DEFAULT_MAX_CONNECTIONS,
            min_idle: Some(Self::DEFAULT_MIN_IDLE),
            checkout_timeout: Self::DEFAULT_CHECKOUT_TIMEOUT,
        }
    }

    /// Cap the number of open connections.
    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    /// Keep at least this many idle connections warm, or `None` to let the
    /// pool drain fully between bursts.
    pub fn with_min_idle(mut self, min_idle: Option<u32>) -> Self {
        self.min_idle = min_idle;
        self
    }

    /// Bound how long a checkout may wait for a free connection.
    pub fn with_checkout_timeout(mut self, timeout: Duration) -> Self {
        self.checkout_timeout = timeout;
        self
    }

    /// The configured database URL.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }
}

/// Shared handle on the PostgreSQL connection pool.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Build a pool from the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Build`] when the pool cannot be constructed or
    /// its initial connections cannot be established.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let PoolConfig {
            database_url,
            max_connections,
            min_idle,
            checkout_timeout,
        } = config;

        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);
        let inner = Pool::builder()
            .max_size(max_connections)
            .min_idle(min_idle)
            .connection_timeout(checkout_timeout)
            .build(manager)
            .await
            .map_err(|error| PoolError::build(error.to_string()))?;

        Ok(Self { inner })
    }

    /// Borrow a connection, waiting up to the configured checkout timeout.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Checkout`] when no connection becomes available
    /// in time.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|error| PoolError::checkout(error.to_string()))
    }
}
