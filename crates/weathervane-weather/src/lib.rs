//! Weather data for Weathervane
//!
//! Fetches current conditions and the 5-day forecast from OpenWeatherMap,
//! resolves coordinates to a city through OpenCage, and derives the
//! display values (condition labels, rounded temperatures, compass points).

pub mod classify;
mod forecast;
pub mod format;
pub mod geocode;
pub mod location;
pub mod provider;
pub mod types;
mod wire;

pub use classify::{classify, ConditionLabel};
pub use format::{
    format_pressure, format_temperature, format_wind_speed, pressure_description,
    weekday_name, wind_description, wind_direction, PressureLevel, WindDirection, WindStrength,
};
pub use forecast::SAMPLES_PER_DAY;
pub use geocode::Geocoder;
pub use location::{locate, LocationSource, StaticLocation};
pub use provider::{ProviderOptions, WeatherProvider};
pub use types::*;
