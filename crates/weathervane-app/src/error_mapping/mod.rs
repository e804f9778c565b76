//! Maps library errors to `weathervane_core::AppError` for consistent user-facing messages.

mod location;
mod weather;

use weathervane_core::AppError;

/// Conversion into the application error hierarchy.
///
/// A local trait because both sides of the conversion live in other crates.
pub trait IntoAppError {
    fn into_app_error(self) -> AppError;
}

/// The banner text for any convertible error.
pub fn user_message<E: IntoAppError>(error: E) -> &'static str {
    error.into_app_error().user_message()
}
