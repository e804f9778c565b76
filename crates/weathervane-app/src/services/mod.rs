pub mod weather_service;

pub use weather_service::{FetchOutcome, WeatherService, WeatherServiceMessage};
