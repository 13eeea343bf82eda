//! Database settings read from the environment.
//!
//! | Variable                        | Required | Default |
//! |---------------------------------|----------|---------|
//! | `DATABASE_URL`                  | yes      |         |
//! | `DATABASE_POOL_SIZE`            | no       | 10      |
//! | `DATABASE_CONNECT_TIMEOUT_SECS` | no       | 30      |

use crate::message::adapters::postgres::PgPool;
use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the `PostgreSQL` connection URL.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
/// Environment variable holding the maximum pool size.
pub const POOL_SIZE_VAR: &str = "DATABASE_POOL_SIZE";
/// Environment variable holding the connection timeout in seconds.
pub const CONNECT_TIMEOUT_VAR: &str = "DATABASE_CONNECT_TIMEOUT_SECS";

/// Errors raised while loading configuration or building the pool.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("{0} must be set")]
    Missing(&'static str),

    /// A variable holds a value that cannot be parsed.
    #[error("{name} has invalid value '{value}': {reason}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// Raw value found.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The connection pool could not be created.
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
}

/// Connection settings for the `PostgreSQL` adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    url: String,
    pool_size: u32,
    connect_timeout: Duration,
}

impl DatabaseConfig {
    /// Pool size used when none is configured.
    pub const DEFAULT_POOL_SIZE: u32 = 10;
    /// Connection timeout used when none is configured.
    pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Creates a configuration with default pool settings.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            pool_size: Self::DEFAULT_POOL_SIZE,
            connect_timeout: Self::DEFAULT_CONNECT_TIMEOUT,
        }
    }

    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when `DATABASE_URL` is unset and
    /// [`ConfigError::Invalid`] when a numeric setting does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `lookup`, which maps variable names
    /// to values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when the URL is absent or blank and
    /// [`ConfigError::Invalid`] when a numeric setting does not parse or is
    /// zero.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let url = lookup(DATABASE_URL_VAR)
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::Missing(DATABASE_URL_VAR))?;

        let pool_size = match lookup(POOL_SIZE_VAR) {
            Some(raw) => parse_positive(POOL_SIZE_VAR, &raw)?,
            None => Self::DEFAULT_POOL_SIZE,
        };
        let connect_timeout = match lookup(CONNECT_TIMEOUT_VAR) {
            Some(raw) => Duration::from_secs(u64::from(parse_positive(CONNECT_TIMEOUT_VAR, &raw)?)),
            None => Self::DEFAULT_CONNECT_TIMEOUT,
        };

        Ok(Self {
            url,
            pool_size,
            connect_timeout,
        })
    }

    /// Returns the connection URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the connection URL with credentials hidden, for logging.
    ///
    /// # Examples
    ///
    /// ```
    /// use letterbox::config::DatabaseConfig;
    ///
    /// let config = DatabaseConfig::new("postgres://app:secret@db:5432/letterbox");
    /// assert_eq!(config.redacted_url(), "postgres://<hidden>@db:5432/letterbox");
    /// ```
    #[must_use]
    pub fn redacted_url(&self) -> String {
        let Some((scheme, rest)) = self.url.split_once("://") else {
            return "<invalid format>".to_owned();
        };
        match rest.rsplit_once('@') {
            Some((_, host)) => format!("{scheme}://<hidden>@{host}"),
            None => self.url.clone(),
        }
    }

    /// Returns the maximum number of pooled connections.
    #[must_use]
    pub const fn pool_size(&self) -> u32 {
        self.pool_size
    }

    /// Returns how long to wait for a pooled connection.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Builds the r2d2 pool used by the `PostgreSQL` adapters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Pool`] when the initial connections cannot be
    /// established.
    pub fn build_pool(&self) -> Result<PgPool, ConfigError> {
        tracing::info!(
            url = %self.redacted_url(),
            pool_size = self.pool_size,
            "connecting to database"
        );
        let manager = ConnectionManager::<PgConnection>::new(self.url.clone());
        let pool = Pool::builder()
            .max_size(self.pool_size)
            .connection_timeout(self.connect_timeout)
            .build(manager)?;
        Ok(pool)
    }
}

fn parse_positive(name: &'static str, raw: &str) -> Result<u32, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        name,
        value: raw.to_owned(),
        reason,
    };
    let value: u32 = raw.trim().parse().map_err(|e| invalid(format!("{e}")))?;
    if value == 0 {
        return Err(invalid("must be greater than zero".to_owned()));
    }
    Ok(value)
}
