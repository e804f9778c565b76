use weathervane_core::{AppError, ConfigError, NetworkError, ReqwestErrorExt, WeatherError};
use weathervane_weather::WeatherError as ProviderError;

use super::IntoAppError;

impl IntoAppError for ProviderError {
    fn into_app_error(self) -> AppError {
        match self {
            ProviderError::MissingApiKey { service } => AppError::Config(
                ConfigError::MissingSetting(format!("{}.api_key", service)),
            ),
            ProviderError::CityNotFound(city) => {
                AppError::Weather(WeatherError::CityNotFound(city))
            }
            ProviderError::Resolve(detail) => {
                AppError::Weather(WeatherError::ResolveFailed(detail))
            }
            ProviderError::Network(e) => AppError::Network(e.into_network_error()),
            ProviderError::Http { status, message } => {
                AppError::Network(NetworkError::ServerError { status, message })
            }
            ProviderError::Decode(detail) => {
                AppError::Network(NetworkError::InvalidResponse(detail))
            }
        }
    }
}
