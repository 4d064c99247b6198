//! Climate observation API server.
//!
//! Read-only JSON endpoints over a fixed dataset of weather stations and
//! their daily precipitation and temperature readings.

pub mod config;
pub mod domain;
pub mod store;
pub mod web;
