//! In-memory climate store.
//!
//! Serves stations and measurements held in memory, either built directly
//! or loaded from a JSON fixture file. Useful for development and testing
//! without a SQLite database.

use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::{
    DateRange, Measurement, PrecipitationReading, Station, TemperatureReading, TemperatureSummary,
};

use super::ClimateStore;
use super::error::StoreError;

/// Fixture file layout: `{"stations": [...], "measurements": [...]}`.
#[derive(Debug, Deserialize)]
struct Fixture {
    stations: Vec<Station>,
    measurements: Vec<Measurement>,
}

/// Climate store over in-memory records.
///
/// Measurements are kept in load order, which plays the role of the row id
/// in the SQLite store when readings share a date.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    stations: Arc<Vec<Station>>,
    measurements: Arc<Vec<Measurement>>,
}

impl InMemoryStore {
    /// Create a store from records.
    pub fn new(stations: Vec<Station>, measurements: Vec<Measurement>) -> Self {
        Self {
            stations: Arc::new(stations),
            measurements: Arc::new(measurements),
        }
    }

    /// Load a store from a JSON fixture file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();

        let json = std::fs::read_to_string(path).map_err(|e| StoreError::Fixture {
            message: format!("failed to read {}: {e}", path.display()),
        })?;

        let fixture: Fixture = serde_json::from_str(&json).map_err(|e| StoreError::Fixture {
            message: format!("failed to parse {}: {e}", path.display()),
        })?;

        tracing::info!(
            path = %path.display(),
            stations = fixture.stations.len(),
            measurements = fixture.measurements.len(),
            "Loaded climate fixture"
        );

        Ok(Self::new(fixture.stations, fixture.measurements))
    }

    /// Measurements on or after `cutoff`, sorted by date. The sort is
    /// stable, so readings sharing a date keep their load order.
    fn since(&self, cutoff: NaiveDate) -> Vec<&Measurement> {
        let mut rows: Vec<_> = self
            .measurements
            .iter()
            .filter(|m| m.date >= cutoff)
            .collect();
        rows.sort_by_key(|m| m.date);
        rows
    }
}

impl ClimateStore for InMemoryStore {
    fn precipitation_since(
        &self,
        cutoff: NaiveDate,
    ) -> Result<Vec<PrecipitationReading>, StoreError> {
        Ok(self.since(cutoff).into_iter().map(Into::into).collect())
    }

    fn stations(&self) -> Result<Vec<Station>, StoreError> {
        let mut stations = self.stations.as_ref().clone();
        stations.sort_by(|a, b| a.station.cmp(&b.station));
        Ok(stations)
    }

    fn temperatures_since(
        &self,
        station: &str,
        cutoff: NaiveDate,
    ) -> Result<Vec<TemperatureReading>, StoreError> {
        Ok(self
            .since(cutoff)
            .into_iter()
            .filter(|m| m.station == station)
            .map(Into::into)
            .collect())
    }

    fn temperature_summary(&self, range: DateRange) -> Result<TemperatureSummary, StoreError> {
        Ok(TemperatureSummary::from_temperatures(
            self.measurements
                .iter()
                .filter(|m| range.contains(m.date))
                .map(|m| m.tobs),
        ))
    }
}
