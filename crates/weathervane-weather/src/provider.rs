//! OpenWeatherMap client: current conditions plus the 5-day forecast.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::forecast::{daily_forecast, hourly_forecast, snapshot_from};
use crate::types::{WeatherError, WeatherReport};
use crate::wire::{decode, ApiErrorBody, CurrentResponse, ForecastResponse};

pub const OPENWEATHER_API_BASE: &str = "https://api.openweathermap.org";
pub const DEFAULT_LANG: &str = "ru";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for [`WeatherProvider`]
#[derive(Debug, Clone)]
pub struct ProviderOptions {
    pub base_url: String,
    /// Language for descriptions and weekday names
    pub lang: String,
    pub timeout: Duration,
}

impl Default for ProviderOptions {
    fn default() -> Self {
        Self {
            base_url: OPENWEATHER_API_BASE.to_string(),
            lang: DEFAULT_LANG.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    api_key: Option<String>,
    base_url: String,
    lang: String,
}

impl WeatherProvider {
    pub fn new(api_key: Option<String>, options: ProviderOptions) -> Result<Self, WeatherError> {
        let client = Client::builder().timeout(options.timeout).build()?;

        Ok(Self {
            client: Arc::new(client),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: options.base_url.trim_end_matches('/').to_string(),
            lang: options.lang,
        })
    }

    /// Fetch current conditions, then the forecast, for a city name.
    ///
    /// The forecast is requested only once current conditions succeed, so
    /// an unknown city costs a single request. Only a 404 on current
    /// conditions means the city is unknown.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_weather(&self, city: &str) -> Result<WeatherReport, WeatherError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(WeatherError::MissingApiKey { service: "weather" })?;

        let city = city.trim();
        if city.is_empty() {
            return Err(WeatherError::CityNotFound(String::new()));
        }

        let current: CurrentResponse = self
            .get_json("/data/2.5/weather", city, api_key, "current weather")
            .await
            .map_err(|e| match e {
                WeatherError::Http { status: 404, .. } => {
                    WeatherError::CityNotFound(city.to_string())
                }
                other => other,
            })?;
        let snapshot = snapshot_from(&current)?;

        let forecast: ForecastResponse = self
            .get_json("/data/2.5/forecast", city, api_key, "forecast")
            .await?;

        let report = WeatherReport {
            snapshot,
            forecast: daily_forecast(&forecast, &self.lang)?,
            hourly: hourly_forecast(&forecast)?,
        };

        tracing::info!(
            "Fetched weather for {}: {:.1}°C, {} forecast days",
            current.name.as_deref().unwrap_or(city),
            report.snapshot.temperature,
            report.forecast.len()
        );
        Ok(report)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        city: &str,
        api_key: &str,
        what: &str,
    ) -> Result<T, WeatherError> {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!("GET {} for {}", url, city);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", api_key),
                ("units", "metric"),
                ("lang", self.lang.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            decode(&body, what)
        } else {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or(body);
            tracing::warn!("{} request failed with {}: {}", what, status, message);
            Err(WeatherError::Http {
                status: status.as_u16(),
                message,
            })
        }
    }
}
