//! Server configuration.
//!
//! Every setting has a default and can be overridden by an environment
//! variable (see [`ServerConfig::from_env`]).

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use chrono::NaiveDate;

/// Error for an environment variable that is set but cannot be used.
#[derive(Debug, thiserror::Error)]
#[error("invalid value {value:?} for {key}: {reason}")]
pub struct ConfigError {
    key: &'static str,
    value: String,
    reason: String,
}

/// SQLite database settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    pub path: String,

    /// Maximum number of pooled connections
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "Resources/hawaii.sqlite".to_string(),
            max_connections: 4,
        }
    }
}

/// Constants that shape the fixed queries.
#[derive(Debug, Clone)]
pub struct QueryConfig {
    /// Start of the "last year" window for precipitation and tobs.
    pub cutoff_date: NaiveDate,

    /// Station whose temperatures the tobs route reports.
    pub active_station: String,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            cutoff_date: NaiveDate::from_ymd_opt(2016, 8, 23).unwrap_or_default(),
            active_station: "USC00519281".to_string(),
        }
    }
}

/// Top-level configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on.
    pub bind_addr: SocketAddr,

    /// Per-request timeout (seconds). Slower requests get 408.
    pub request_timeout_secs: u64,

    pub database: DatabaseConfig,

    /// Serve from a JSON fixture instead of the database when set.
    pub fixture: Option<PathBuf>,

    pub query: QueryConfig,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `CLIMATE_BIND_ADDR` | `127.0.0.1:5000` |
    /// | `CLIMATE_REQUEST_TIMEOUT_SECS` | `30` |
    /// | `CLIMATE_DATABASE` | `Resources/hawaii.sqlite` |
    /// | `CLIMATE_MAX_CONNECTIONS` | `4` |
    /// | `CLIMATE_FIXTURE` | unset |
    /// | `CLIMATE_CUTOFF_DATE` | `2016-08-23` |
    /// | `CLIMATE_ACTIVE_STATION` | `USC00519281` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration using `lookup` to read variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let cutoff_date = match lookup("CLIMATE_CUTOFF_DATE") {
            Some(value) => NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|e| {
                ConfigError {
                    key: "CLIMATE_CUTOFF_DATE",
                    value,
                    reason: e.to_string(),
                }
            })?,
            None => defaults.query.cutoff_date,
        };

        Ok(Self {
            bind_addr: parse_var(&lookup, "CLIMATE_BIND_ADDR", defaults.bind_addr)?,
            request_timeout_secs: parse_var(
                &lookup,
                "CLIMATE_REQUEST_TIMEOUT_SECS",
                defaults.request_timeout_secs,
            )?,
            database: DatabaseConfig {
                path: lookup("CLIMATE_DATABASE").unwrap_or(defaults.database.path),
                max_connections: parse_var(
                    &lookup,
                    "CLIMATE_MAX_CONNECTIONS",
                    defaults.database.max_connections,
                )?,
            },
            fixture: lookup("CLIMATE_FIXTURE").map(PathBuf::from),
            query: QueryConfig {
                cutoff_date,
                active_station: lookup("CLIMATE_ACTIVE_STATION")
                    .unwrap_or(defaults.query.active_station),
            },
        })
    }

    /// Returns the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            request_timeout_secs: 30,
            database: DatabaseConfig::default(),
            fixture: None,
            query: QueryConfig::default(),
        }
    }
}

/// Parse `key` with `FromStr`, falling back to `default` when unset.
fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(value) => value.parse().map_err(|e: T::Err| ConfigError {
            key,
            reason: e.to_string(),
            value,
        }),
        None => Ok(default),
    }
}
