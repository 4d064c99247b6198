//! Web layer for the climate observation API.
//!
//! Provides read-only JSON endpoints over stations and measurements.

mod dto;
mod routes;
mod state;

#[cfg(test)]
mod routes_tests;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
