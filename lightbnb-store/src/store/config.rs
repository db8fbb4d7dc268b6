//! Connection settings for [`PgStore`](super::PgStore)
//!
//! Read from the environment (and `.env`): either `DATABASE_URL`, or the
//! discrete `DB_HOST` / `DB_USER` / `DB_PASSWORD` / `DB_NAME` / `DB_PORT`
//! variables. `LIGHTBNB_MAX_CONNECTIONS` caps the pool.

use std::fmt;

use sqlx::postgres::PgConnectOptions;

use super::StoreError;

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Where to connect
#[derive(Clone, PartialEq)]
pub enum ConnectionTarget {
    Url(String),
    Parts {
        host: String,
        port: Option<u16>,
        user: String,
        password: Option<String>,
        database: String,
    },
}

impl fmt::Debug for ConnectionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // URLs may carry credentials
            Self::Url(_) => f.write_str("Url(<redacted>)"),
            Self::Parts {
                host,
                port,
                user,
                database,
                ..
            } => f
                .debug_struct("Parts")
                .field("host", host)
                .field("port", port)
                .field("user", user)
                .field("database", database)
                .finish_non_exhaustive(),
        }
    }
}

/// Store configuration
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    pub target: ConnectionTarget,
    pub max_connections: u32,
}

impl StoreConfig {
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            target: ConnectionTarget::Url(url.into()),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections.max(1);
        self
    }

    /// Load from process environment, after reading `.env` if present.
    ///
    /// # Errors
    ///
    /// Returns an error if neither `DATABASE_URL` nor `DB_NAME` is set, or a
    /// numeric variable does not parse.
    pub fn from_env() -> Result<Self, StoreError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, StoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let target = match lookup("DATABASE_URL").filter(|v| !v.trim().is_empty()) {
            Some(url) => ConnectionTarget::Url(url),
            None => {
                let database = lookup("DB_NAME").ok_or_else(|| {
                    StoreError::Config("set DATABASE_URL or DB_NAME (with DB_HOST, DB_USER)".into())
                })?;
                let port = lookup("DB_PORT")
                    .map(|p| {
                        p.parse::<u16>()
                            .map_err(|_| StoreError::Config(format!("invalid DB_PORT '{}'", p)))
                    })
                    .transpose()?;
                ConnectionTarget::Parts {
                    host: lookup("DB_HOST").unwrap_or_else(|| "localhost".to_owned()),
                    port,
                    user: lookup("DB_USER").unwrap_or_else(|| "postgres".to_owned()),
                    password: lookup("DB_PASSWORD"),
                    database,
                }
            }
        };

        let max_connections = match lookup("LIGHTBNB_MAX_CONNECTIONS") {
            Some(raw) => raw.parse::<u32>().map_err(|_| {
                StoreError::Config(format!("invalid LIGHTBNB_MAX_CONNECTIONS '{}'", raw))
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            target,
            max_connections: max_connections.max(1),
        })
    }

    /// sqlx connect options for this target.
    pub fn connect_options(&self) -> Result<PgConnectOptions, StoreError> {
        match &self.target {
            ConnectionTarget::Url(url) => url
                .parse::<PgConnectOptions>()
                .map_err(StoreError::from),
            ConnectionTarget::Parts {
                host,
                port,
                user,
                password,
                database,
            } => {
                let mut options = PgConnectOptions::new()
                    .host(host)
                    .username(user)
                    .database(database);
                if let Some(port) = port {
                    options = options.port(*port);
                }
                if let Some(password) = password {
                    options = options.password(password);
                }
                Ok(options)
            }
        }
    }
}
