//! Application layer for Weathervane: view state, the async weather
//! service and the mapping of library errors to user-facing messages.

pub mod error_mapping;
pub mod services;
pub mod state;

pub use error_mapping::{user_message, IntoAppError};
pub use services::{FetchOutcome, WeatherService, WeatherServiceMessage};
pub use state::{RequestId, ViewEvent, ViewState};
