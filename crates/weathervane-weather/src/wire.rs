//! Response schemas for the external services.
//!
//! Payloads are decoded into these structs at the boundary so that a shape
//! mismatch fails the request instead of leaking defaults into the model.

use serde::{de::DeserializeOwned, Deserialize};

use crate::types::WeatherError;

/// `main` block shared by current conditions and forecast samples
#[derive(Debug, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub feels_like: f64,
    pub pressure: f64,
    #[serde(default)]
    pub temp_min: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct ConditionDescription {
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct Wind {
    pub speed: f64,
    pub deg: f64,
}

/// OpenWeatherMap `/data/2.5/weather`
#[derive(Debug, Deserialize)]
pub struct CurrentResponse {
    pub main: MainReadings,
    pub weather: Vec<ConditionDescription>,
    pub wind: Wind,
    #[serde(default)]
    pub name: Option<String>,
}

impl CurrentResponse {
    /// First condition description; the list must not be empty.
    pub fn description(&self) -> Result<&str, WeatherError> {
        self.weather
            .first()
            .map(|w| w.description.as_str())
            .ok_or_else(|| WeatherError::Decode("current weather has no conditions".into()))
    }
}

/// One 3-hour sample of the forecast list
#[derive(Debug, Deserialize)]
pub struct ForecastSample {
    /// Epoch seconds
    pub dt: i64,
    pub main: MainReadings,
}

#[derive(Debug, Default, Deserialize)]
pub struct ForecastCity {
    /// UTC offset in seconds
    #[serde(default)]
    pub timezone: Option<i32>,
}

/// OpenWeatherMap `/data/2.5/forecast`
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub list: Vec<ForecastSample>,
    #[serde(default)]
    pub city: Option<ForecastCity>,
}

impl ForecastResponse {
    pub fn utc_offset_seconds(&self) -> i32 {
        self.city.as_ref().and_then(|c| c.timezone).unwrap_or(0)
    }
}

/// Error body OpenWeatherMap sends alongside non-2xx statuses
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// OpenCage `/geocode/v1/json`
#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    pub components: AddressComponents,
}

#[derive(Debug, Default, Deserialize)]
pub struct AddressComponents {
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub municipality: Option<String>,
    pub county: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

impl AddressComponents {
    /// Prefer city > town > village > municipality > county > state.
    pub fn place_name(&self) -> Option<&str> {
        [
            &self.city,
            &self.town,
            &self.village,
            &self.municipality,
            &self.county,
            &self.state,
        ]
        .into_iter()
        .filter_map(|part| part.as_deref())
        .map(str::trim)
        .find(|name| !name.is_empty())
    }
}

/// Decode a response body, reporting the serde error on mismatch.
pub fn decode<T: DeserializeOwned>(body: &str, what: &str) -> Result<T, WeatherError> {
    serde_json::from_str(body).map_err(|e| WeatherError::Decode(format!("{}: {}", what, e)))
}
