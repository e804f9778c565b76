use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::classify::ConditionLabel;
use crate::format::WindDirection;

const OSM_BASE_URL: &str = "https://www.openstreetmap.org/";

/// Zoom level used for map links
pub const DEFAULT_MAP_ZOOM: u8 = 13;

/// Geographic position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// True when both components are finite and inside the WGS84 ranges.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// OpenStreetMap link with a marker at this position.
    pub fn map_url(&self, zoom: u8) -> String {
        let lat = format!("{:.5}", self.latitude);
        let lon = format!("{:.5}", self.longitude);
        format!(
            "{}?mlat={}&mlon={}#map={}/{}/{}",
            OSM_BASE_URL, lat, lon, zoom, lat, lon
        )
    }
}

/// City currently displayed.
///
/// `country` is empty when the city was typed in by name rather than
/// resolved from coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CityRef {
    pub name: String,
    pub country: String,
}

impl CityRef {
    pub fn new(name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
        }
    }

    /// City entered by name, without a known country.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, String::new())
    }

    /// "Name, Country", or just the name when the country is unknown.
    pub fn display_name(&self) -> String {
        if self.country.is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.country)
        }
    }
}

/// One point-in-time reading of current conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Air temperature in °C
    pub temperature: f64,
    /// Perceived temperature in °C
    pub feels_like: f64,
    /// Sea-level pressure in hPa
    pub pressure: f64,
    /// Provider's localized description ("небольшой дождь", ...)
    pub precipitation_description: String,
    /// Wind speed in m/s
    pub wind_speed: f64,
    pub wind_direction: WindDirection,
    pub condition: ConditionLabel,
}

/// One sampled day of the forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub date: NaiveDate,
    pub day_name: String,
    pub temperature: f64,
    pub min_temp: f64,
    pub condition: ConditionLabel,
}

/// One raw 3-hour forecast sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyEntry {
    /// Sample time in the city's local offset
    pub time: DateTime<FixedOffset>,
    pub temperature: f64,
    pub condition: ConditionLabel,
}

/// Everything one successful fetch produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub snapshot: WeatherSnapshot,
    pub forecast: Vec<ForecastEntry>,
    pub hourly: Vec<HourlyEntry>,
}

/// Location service errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    #[error("Location service unavailable")]
    Unavailable,
    #[error("Location request timed out")]
    Timeout,
    #[error("Location error: {0}")]
    Other(String),
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("No API key configured for the {service} service")]
    MissingApiKey { service: &'static str },
    #[error("City not found: {0}")]
    CityNotFound(String),
    #[error("Could not resolve a city: {0}")]
    Resolve(String),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Service returned {status}: {message}")]
    Http { status: u16, message: String },
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl WeatherError {
    /// True for the generic network, status and parse failures of a fetch.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Http { .. } | Self::Decode(_))
    }
}
