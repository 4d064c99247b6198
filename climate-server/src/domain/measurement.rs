//! Dated precipitation and temperature readings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single day's reading at a station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Identifier of the station that took the reading
    pub station: String,

    /// Observation date, stored as `YYYY-MM-DD`
    pub date: NaiveDate,

    /// Precipitation in inches, missing on some days
    pub prcp: Option<f64>,

    /// Observed temperature in degrees Fahrenheit
    pub tobs: f64,
}

/// A (date, precipitation) pair from the measurement log.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrecipitationReading {
    pub date: NaiveDate,
    pub prcp: Option<f64>,
}

/// A (date, temperature) pair from the measurement log.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureReading {
    pub date: NaiveDate,
    pub tobs: f64,
}

impl From<&Measurement> for PrecipitationReading {
    fn from(m: &Measurement) -> Self {
        Self {
            date: m.date,
            prcp: m.prcp,
        }
    }
}

impl From<&Measurement> for TemperatureReading {
    fn from(m: &Measurement) -> Self {
        Self {
            date: m.date,
            tobs: m.tobs,
        }
    }
}
