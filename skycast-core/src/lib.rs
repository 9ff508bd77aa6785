//! Core library for the `skycast` weather CLI.
//!
//! This crate defines:
//! - Weather-code descriptions (WMO interpretation codes)
//! - Geocoding and forecast clients for Open-Meteo, behind provider traits
//! - The city/coordinate lookup that composes them
//! - Derived display values, search history and configuration
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod codes;
pub mod config;
pub mod display;
pub mod error;
pub mod history;
pub mod lookup;
pub mod model;
pub mod provider;

pub use codes::{WeatherDescriptor, describe};
pub use config::Config;
pub use error::WeatherError;
pub use history::RecentSearches;
pub use lookup::WeatherLookup;
pub use model::{
    Coordinates, CurrentConditions, DailySeries, ForecastOptions, ForecastResult, HourlySeries,
    LocationCandidate,
};
pub use provider::{ForecastSource, Geocoder, lookup_from_config};
