//! Domain types for the climate observation API.
//!
//! Stations and measurements mirror the two tables of the dataset.
//! Path dates are validated at construction, so code that receives a
//! `QueryDate` can trust that it names a real calendar date.

mod date;
mod measurement;
mod station;
mod summary;

pub use date::{DateRange, InvalidDate, QueryDate};
pub use measurement::{Measurement, PrecipitationReading, TemperatureReading};
pub use station::Station;
pub use summary::TemperatureSummary;
