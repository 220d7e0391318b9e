//! Core library for the `wwo` weather dashboard.
//!
//! This crate defines:
//! - Configuration & credential resolution
//! - The World Weather Online client behind the `WeatherProvider` seam
//! - Typed domain models (requests, current conditions, forecast days)
//! - Description-to-icon lookup
//!
//! It is used by `wwo-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod icon;
pub mod model;
pub mod provider;

pub use config::{ApiKey, Config};
pub use error::WeatherError;
pub use icon::icon_for;
pub use model::{
    CurrentConditions, ForecastDay, ForecastDays, ForecastRequest, InvalidDays, LocationLabel,
    WeatherReport,
};
pub use provider::{WeatherProvider, provider_from_config, wwo::WorldWeatherOnline};
