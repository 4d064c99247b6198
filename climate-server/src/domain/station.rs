//! Weather station reference data.

use serde::{Deserialize, Serialize};

/// A weather-monitoring station.
///
/// Stations are reference data loaded with the dataset and never modified
/// by this service. Field names match the `station` table and the JSON
/// emitted by the stations endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Station identifier (e.g., "USC00519281")
    pub station: String,

    /// Human-readable station name
    pub name: String,

    pub latitude: f64,
    pub longitude: f64,

    /// Elevation in metres
    pub elevation: f64,
}
