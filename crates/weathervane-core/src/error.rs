//! Application-wide error hierarchy.
//!
//! Library crates keep their own error enums; the app layer converts them
//! into [`AppError`], whose `user_message()` is what ends up on screen.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Weather error: {0}")]
    Weather(#[from] WeatherError),

    #[error("Location error: {0}")]
    Location(#[from] LocationError),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Short, non-technical message for the error banner.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Network(e) => e.user_message(),
            AppError::Config(e) => e.user_message(),
            AppError::Weather(e) => e.user_message(),
            AppError::Location(e) => e.user_message(),
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }
}

/// Transport and protocol failures
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed(_) => {
                "Unable to connect. Check your internet connection."
            }
            NetworkError::Timeout => "The weather service did not answer in time.",
            NetworkError::ServerError { status, .. } if *status >= 500 => {
                "The weather service is having problems. Please try again later."
            }
            NetworkError::ServerError { status: 401, .. } => {
                "The weather service rejected the API key. Check your settings."
            }
            NetworkError::ServerError { .. } => "Failed to load weather data.",
            NetworkError::InvalidResponse(_) => "Failed to load weather data.",
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required setting: {0}")]
    MissingSetting(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::MissingSetting(_) => "An API key is missing. Check your settings.",
        }
    }
}

/// Domain failures of a weather lookup
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("Could not determine city: {0}")]
    ResolveFailed(String),
}

impl WeatherError {
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::CityNotFound(_) => "City not found. Check the name and try again.",
            WeatherError::ResolveFailed(_) => {
                "Could not determine your city. Enter a city name instead."
            }
        }
    }
}

/// Failures obtaining the device position
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("Position unavailable")]
    Unavailable,

    #[error("Timed out")]
    Timeout,

    #[error("{0}")]
    Other(String),
}

impl LocationError {
    pub fn user_message(&self) -> &'static str {
        match self {
            LocationError::Unavailable | LocationError::Other(_) => {
                "Your location is unavailable. Enter a city name instead."
            }
            LocationError::Timeout => "Finding your location took too long. Enter a city name.",
        }
    }
}

/// Classify a `reqwest` failure by its cause.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if self.is_decode() {
            NetworkError::InvalidResponse(self.to_string())
        } else if let Some(status) = self.status() {
            NetworkError::ServerError {
                status: status.as_u16(),
                message: self.to_string(),
            }
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}
