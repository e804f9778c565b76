use weathervane_core::{AppError, LocationError};
use weathervane_weather::LocationError as SourceLocationError;

use super::IntoAppError;

impl IntoAppError for SourceLocationError {
    fn into_app_error(self) -> AppError {
        let mapped = match self {
            SourceLocationError::Unavailable => LocationError::Unavailable,
            SourceLocationError::Timeout => LocationError::Timeout,
            SourceLocationError::Other(detail) => LocationError::Other(detail),
        };
        AppError::Location(mapped)
    }
}
