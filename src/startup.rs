//! What the first request looks up.
//!
//! A city on the command line wins. Otherwise the position (command line
//! first, then the `[location]` section) is located, and if that fails the
//! configured default city is used.

use std::time::Duration;

use weathervane_core::LocationConfig;
use weathervane_weather::{locate, Coordinates, LocationError, StaticLocation};

/// Where the first lookup gets its place from
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    City(String),
    Locate(StaticLocation),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    City(String),
    Position(Coordinates),
}

/// Outcome of [`plan`]: the lookup to issue, and why locating failed if it did.
#[derive(Debug, Clone, PartialEq)]
pub struct Startup {
    pub lookup: Option<Lookup>,
    pub location_error: Option<LocationError>,
}

pub fn select_source(
    city: Option<&str>,
    position: Option<(f64, f64)>,
    location: &LocationConfig,
) -> Source {
    if let Some(city) = city {
        return Source::City(city.to_string());
    }
    match position {
        Some((lat, lon)) => Source::Locate(StaticLocation::from_parts(Some(lat), Some(lon))),
        None if location.has_position() => Source::Locate(StaticLocation::from_parts(
            location.latitude,
            location.longitude,
        )),
        None => Source::Locate(StaticLocation::default()),
    }
}

/// The configured default city, ignoring blank values.
pub fn fallback_city(location: &LocationConfig) -> Option<&str> {
    location
        .default_city
        .as_deref()
        .map(str::trim)
        .filter(|city| !city.is_empty())
}

pub async fn plan(
    city: Option<&str>,
    position: Option<(f64, f64)>,
    location: &LocationConfig,
    limit: Duration,
) -> Startup {
    let source = match select_source(city, position, location) {
        Source::City(city) => {
            return Startup {
                lookup: Some(Lookup::City(city)),
                location_error: None,
            }
        }
        Source::Locate(source) => source,
    };

    match locate(&source, limit).await {
        Ok(position) => Startup {
            lookup: Some(Lookup::Position(position)),
            location_error: None,
        },
        Err(e) => {
            tracing::info!("No position available: {}", e);
            Startup {
                lookup: fallback_city(location).map(|city| Lookup::City(city.to_string())),
                location_error: Some(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: Duration = Duration::from_secs(1);

    fn location(position: Option<(f64, f64)>, default_city: Option<&str>) -> LocationConfig {
        LocationConfig {
            latitude: position.map(|p| p.0),
            longitude: position.map(|p| p.1),
            default_city: default_city.map(String::from),
        }
    }

    #[test]
    fn city_argument_wins() {
        let config = location(Some((55.75, 37.62)), Some("Kazan"));
        assert_eq!(
            select_source(Some("Omsk"), Some((1.0, 2.0)), &config),
            Source::City("Omsk".into())
        );
    }

    #[test]
    fn command_line_position_beats_config() {
        let config = location(Some((55.75, 37.62)), None);
        assert_eq!(
            select_source(None, Some((-33.87, 151.21)), &config),
            Source::Locate(StaticLocation::new(Some(Coordinates::new(-33.87, 151.21))))
        );
        assert_eq!(
            select_source(None, None, &config),
            Source::Locate(StaticLocation::new(Some(Coordinates::new(55.75, 37.62))))
        );
    }

    #[test]
    fn no_position_anywhere_locates_nothing() {
        let config = location(None, None);
        assert_eq!(
            select_source(None, None, &config),
            Source::Locate(StaticLocation::default())
        );
    }

    #[test]
    fn blank_default_city_is_ignored() {
        assert_eq!(fallback_city(&location(None, Some("  Sochi "))), Some("Sochi"));
        assert_eq!(fallback_city(&location(None, Some("   "))), None);
        assert_eq!(fallback_city(&location(None, None)), None);
    }

    #[tokio::test]
    async fn located_position_is_looked_up() {
        let startup = plan(None, Some((55.75, 37.62)), &location(None, Some("Kazan")), LIMIT).await;
        assert_eq!(
            startup,
            Startup {
                lookup: Some(Lookup::Position(Coordinates::new(55.75, 37.62))),
                location_error: None,
            }
        );
    }

    #[tokio::test]
    async fn failed_location_falls_back_to_default_city() {
        let startup = plan(None, None, &location(None, Some("Kazan")), LIMIT).await;
        assert_eq!(startup.lookup, Some(Lookup::City("Kazan".into())));
        assert_eq!(startup.location_error, Some(LocationError::Unavailable));
    }

    #[tokio::test]
    async fn invalid_position_falls_back_too() {
        let startup = plan(None, Some((123.0, 0.0)), &location(None, Some("Kazan")), LIMIT).await;
        assert_eq!(startup.lookup, Some(Lookup::City("Kazan".into())));
        assert!(matches!(startup.location_error, Some(LocationError::Other(_))));
    }

    #[tokio::test]
    async fn nothing_to_look_up_without_default_city() {
        let startup = plan(None, None, &location(None, None), LIMIT).await;
        assert!(startup.lookup.is_none());
        assert_eq!(startup.location_error, Some(LocationError::Unavailable));
    }
}
