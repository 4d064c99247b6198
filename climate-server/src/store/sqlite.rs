//! SQLite-backed climate store.
//!
//! Connections are pooled via r2d2 and opened read-only. Each query checks
//! out one connection and returns it to the pool when the guard drops, so
//! no path (including errors) can leak a connection.

use std::path::Path;

use chrono::NaiveDate;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Connection, OpenFlags, params};
use tracing::{debug, info};

use crate::config::DatabaseConfig;
use crate::domain::{DateRange, PrecipitationReading, Station, TemperatureReading, TemperatureSummary};

use super::ClimateStore;
use super::error::StoreError;

/// SQLite connection pool type alias
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Climate store reading from the `station` and `measurement` tables.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: ConnectionPool,
}

impl SqliteStore {
    /// Open a read-only connection pool on an existing database file.
    pub fn open(config: &DatabaseConfig) -> Result<Self, StoreError> {
        if !Path::new(&config.path).is_file() {
            return Err(StoreError::NotFound(config.path.clone()));
        }

        info!(path = %config.path, max_connections = config.max_connections, "Opening climate database");

        let manager = SqliteConnectionManager::file(&config.path).with_flags(
            OpenFlags::SQLITE_OPEN_READ_ONLY
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
                | OpenFlags::SQLITE_OPEN_URI,
        );

        let pool = Pool::builder()
            .max_size(config.max_connections)
            .build(manager)?;

        Ok(Self::from_pool(pool))
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    /// Run `f` with a pooled connection, released when this returns.
    fn with_connection<T>(
        &self,
        f: impl FnOnce(&Connection) -> rusqlite::Result<T>,
    ) -> Result<T, StoreError> {
        let conn = self.pool.get()?;
        Ok(f(&conn)?)
    }
}

impl ClimateStore for SqliteStore {
    fn precipitation_since(
        &self,
        cutoff: NaiveDate,
    ) -> Result<Vec<PrecipitationReading>, StoreError> {
        let readings = self.with_connection(|conn| {
            let mut stmt = conn.prepare_cached(
                "SELECT date, prcp FROM measurement
                 WHERE date >= ?1
                 ORDER BY date, id",
            )?;
            stmt.query_map(params![cutoff], |row| {
                Ok(PrecipitationReading {
                    date: row.get(0)?,
                    prcp: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()
        })?;

        debug!(%cutoff, rows = readings.len(), "Queried precipitation");
        Ok(readings)
    }

    fn stations(&self) -> Result<Vec<Station>, StoreError> {
        let stations = self.with_connection(|conn| {
            let mut stmt = conn.prepare_cached(
                "SELECT station, name, latitude, longitude, elevation FROM station
                 ORDER BY station",
            )?;
            stmt.query_map([], |row| {
                Ok(Station {
                    station: row.get(0)?,
                    name: row.get(1)?,
                    latitude: row.get(2)?,
                    longitude: row.get(3)?,
                    elevation: row.get(4)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()
        })?;

        debug!(rows = stations.len(), "Queried stations");
        Ok(stations)
    }

    fn temperatures_since(
        &self,
        station: &str,
        cutoff: NaiveDate,
    ) -> Result<Vec<TemperatureReading>, StoreError> {
        let readings = self.with_connection(|conn| {
            let mut stmt = conn.prepare_cached(
                "SELECT date, tobs FROM measurement
                 WHERE station = ?1 AND date >= ?2
                 ORDER BY date, id",
            )?;
            stmt.query_map(params![station, cutoff], |row| {
                Ok(TemperatureReading {
                    date: row.get(0)?,
                    tobs: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()
        })?;

        debug!(station, %cutoff, rows = readings.len(), "Queried temperatures");
        Ok(readings)
    }

    fn temperature_summary(&self, range: DateRange) -> Result<TemperatureSummary, StoreError> {
        let summary = self.with_connection(|conn| {
            conn.query_row(
                "SELECT MIN(tobs), MAX(tobs), AVG(tobs) FROM measurement
                 WHERE date >= ?1 AND (?2 IS NULL OR date <= ?2)",
                params![range.start, range.end],
                |row| {
                    Ok(TemperatureSummary {
                        minimum: row.get(0)?,
                        maximum: row.get(1)?,
                        average: row.get(2)?,
                    })
                },
            )
        })?;

        debug!(start = %range.start, end = ?range.end, ?summary, "Queried temperature summary");
        Ok(summary)
    }
}
