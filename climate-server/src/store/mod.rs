//! Read access to the climate dataset.
//!
//! Route handlers depend only on the [`ClimateStore`] trait, so the
//! SQLite-backed store can be swapped for the in-memory one in tests
//! and fixture mode.

mod error;
mod memory;
mod sqlite;

use chrono::NaiveDate;

use crate::domain::{DateRange, PrecipitationReading, Station, TemperatureReading, TemperatureSummary};

pub use error::StoreError;
pub use memory::InMemoryStore;
pub use sqlite::{ConnectionPool, SqliteStore};

/// Typed, parameterized read queries over stations and measurements.
///
/// Methods are blocking. Async callers should run them on a blocking
/// thread (see `tokio::task::spawn_blocking`).
pub trait ClimateStore: Send + Sync {
    /// Precipitation readings dated on or after `cutoff`, in ascending
    /// date order. Readings sharing a date keep their load order.
    fn precipitation_since(&self, cutoff: NaiveDate)
    -> Result<Vec<PrecipitationReading>, StoreError>;

    /// All stations, ordered by station identifier.
    fn stations(&self) -> Result<Vec<Station>, StoreError>;

    /// Temperature readings for one station dated on or after `cutoff`,
    /// in ascending date order.
    fn temperatures_since(
        &self,
        station: &str,
        cutoff: NaiveDate,
    ) -> Result<Vec<TemperatureReading>, StoreError>;

    /// Min, max and mean temperature across all stations within `range`.
    fn temperature_summary(&self, range: DateRange) -> Result<TemperatureSummary, StoreError>;
}
