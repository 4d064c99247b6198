//! Data transfer objects for web responses.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{PrecipitationReading, TemperatureReading, TemperatureSummary};

/// Landing page listing the available routes.
#[derive(Debug, Serialize)]
pub struct RoutesResponse {
    pub routes: Vec<&'static str>,
}

/// Precipitation keyed by date.
///
/// A date appears once even if several stations reported on it.
pub type PrecipitationResponse = BTreeMap<NaiveDate, Option<f64>>;

/// Collapse date-ordered readings into a date → precipitation map.
///
/// When readings share a date the last one wins.
pub fn precipitation_by_date(
    readings: impl IntoIterator<Item = PrecipitationReading>,
) -> PrecipitationResponse {
    readings.into_iter().map(|r| (r.date, r.prcp)).collect()
}

/// A dated temperature observation.
#[derive(Debug, Serialize)]
pub struct TemperatureObservation {
    #[serde(rename = "Date")]
    pub date: NaiveDate,

    #[serde(rename = "Temp")]
    pub temp: f64,
}

impl From<TemperatureReading> for TemperatureObservation {
    fn from(reading: TemperatureReading) -> Self {
        Self {
            date: reading.date,
            temp: reading.tobs,
        }
    }
}

/// Temperature aggregates for a date range.
///
/// All three fields are null when no readings fall in the range.
#[derive(Debug, PartialEq, Serialize)]
pub struct TemperatureSummaryResponse {
    #[serde(rename = "Minimum Temp")]
    pub minimum: Option<f64>,

    #[serde(rename = "Maximum Temp")]
    pub maximum: Option<f64>,

    /// Rounded to two decimal places
    #[serde(rename = "Average Temp")]
    pub average: Option<f64>,
}

impl From<TemperatureSummary> for TemperatureSummaryResponse {
    fn from(summary: TemperatureSummary) -> Self {
        Self {
            minimum: summary.minimum,
            maximum: summary.maximum,
            average: summary.rounded_average(),
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
