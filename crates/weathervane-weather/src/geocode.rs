//! Reverse geocoding: coordinates to a city name via OpenCage.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tracing::instrument;

use crate::types::{CityRef, Coordinates, WeatherError};
use crate::wire::{decode, GeocodeResponse};

pub const OPENCAGE_API_BASE: &str = "https://api.opencagedata.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct Geocoder {
    client: Arc<Client>,
    api_key: Option<String>,
    base_url: String,
}

impl Geocoder {
    pub fn new(api_key: Option<String>) -> Result<Self, WeatherError> {
        Self::with_base_url(api_key, OPENCAGE_API_BASE, REQUEST_TIMEOUT)
    }

    pub fn with_base_url(
        api_key: Option<String>,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, WeatherError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client: Arc::new(client),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve a position to the best place name of the first result.
    ///
    /// Every failure after the key check (transport, status, empty result
    /// list, no usable name) is reported as [`WeatherError::Resolve`].
    #[instrument(skip(self), level = "info")]
    pub async fn resolve_city(&self, position: Coordinates) -> Result<CityRef, WeatherError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(WeatherError::MissingApiKey {
                service: "geocoding",
            })?;

        let url = format!("{}/geocode/v1/json", self.base_url);
        let query = format!("{} {}", position.latitude, position.longitude);

        let response = self
            .client
            .get(&url)
            .query(&[("q", query.as_str()), ("key", api_key)])
            .send()
            .await
            .map_err(|e| WeatherError::Resolve(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("Reverse geocode returned status {}", status);
            return Err(WeatherError::Resolve(format!("geocoder returned {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| WeatherError::Resolve(format!("reading body: {}", e)))?;
        let parsed: GeocodeResponse =
            decode(&body, "geocode").map_err(|e| WeatherError::Resolve(e.to_string()))?;

        let components = parsed
            .results
            .into_iter()
            .next()
            .map(|r| r.components)
            .ok_or_else(|| WeatherError::Resolve("no results for position".into()))?;

        let name = components
            .place_name()
            .ok_or_else(|| WeatherError::Resolve("result has no place name".into()))?
            .to_string();
        let country = components.country.unwrap_or_default();

        let city = CityRef::new(name, country.trim());
        tracing::info!("Reverse geocoded to: {}", city.display_name());
        Ok(city)
    }
}
