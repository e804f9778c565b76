//! View state and the transitions that drive it.
//!
//! Each completed fetch replaces city, position and report together, and
//! only the most recently started request may do so.

use weathervane_weather::{CityRef, Coordinates, WeatherReport};

/// Tag for one fetch; later requests compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    FetchStarted {
        request: RequestId,
    },
    FetchSucceeded {
        request: RequestId,
        city: CityRef,
        position: Option<Coordinates>,
        report: WeatherReport,
    },
    FetchFailed {
        request: RequestId,
        message: String,
    },
    /// The request was abandoned without a result.
    FetchCancelled {
        request: RequestId,
    },
    LocationFailed {
        message: String,
    },
}

/// Everything the renderer needs
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    pub city: Option<CityRef>,
    pub position: Option<Coordinates>,
    pub report: Option<WeatherReport>,
    pub loading: bool,
    pub error: Option<String>,
    /// Why the device position could not be used; outlives fetch errors.
    pub location_error: Option<String>,
    pub active_request: Option<RequestId>,
}

impl ViewState {
    pub fn apply(self, event: ViewEvent) -> Self {
        match event {
            ViewEvent::FetchStarted { request } => self.on_fetch_started(request),
            ViewEvent::FetchSucceeded {
                request,
                city,
                position,
                report,
            } => self.on_fetch_succeeded(request, city, position, report),
            ViewEvent::FetchFailed { request, message } => self.on_fetch_failed(request, message),
            ViewEvent::FetchCancelled { request } => self.on_fetch_cancelled(request),
            ViewEvent::LocationFailed { message } => self.on_location_failed(message),
        }
    }

    /// True if `request` is the one whose result will be shown.
    pub fn is_active(&self, request: RequestId) -> bool {
        self.active_request == Some(request)
    }

    /// True if applying `event` would finish the active request.
    pub fn completes(&self, event: &ViewEvent) -> bool {
        match event {
            ViewEvent::FetchSucceeded { request, .. }
            | ViewEvent::FetchFailed { request, .. }
            | ViewEvent::FetchCancelled { request } => self.is_active(*request),
            _ => false,
        }
    }

    fn on_fetch_started(self, request: RequestId) -> Self {
        Self {
            loading: true,
            error: None,
            active_request: Some(request),
            ..self
        }
    }

    fn on_fetch_succeeded(
        self,
        request: RequestId,
        city: CityRef,
        position: Option<Coordinates>,
        report: WeatherReport,
    ) -> Self {
        if !self.is_active(request) {
            tracing::debug!("Dropping result of stale request {}", request);
            return self;
        }
        let location_error = match position {
            Some(_) => None,
            None => self.location_error,
        };
        Self {
            city: Some(city),
            position,
            report: Some(report),
            loading: false,
            error: None,
            location_error,
            active_request: None,
        }
    }

    /// Keeps the previous city so the header still says what was asked for.
    fn on_fetch_failed(self, request: RequestId, message: String) -> Self {
        if !self.is_active(request) {
            tracing::debug!("Dropping failure of stale request {}", request);
            return self;
        }
        Self {
            report: None,
            loading: false,
            error: Some(message),
            active_request: None,
            ..self
        }
    }

    /// Previous city, report and error stay as they were.
    fn on_fetch_cancelled(self, request: RequestId) -> Self {
        if !self.is_active(request) {
            return self;
        }
        Self {
            loading: false,
            active_request: None,
            ..self
        }
    }

    fn on_location_failed(self, message: String) -> Self {
        Self {
            location_error: Some(message),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weathervane_weather::{classify, WeatherSnapshot, WindDirection};

    fn report(temperature: f64) -> WeatherReport {
        WeatherReport {
            snapshot: WeatherSnapshot {
                temperature,
                feels_like: temperature,
                pressure: 1013.0,
                precipitation_description: "ясно".into(),
                wind_speed: 1.0,
                wind_direction: WindDirection::North,
                condition: classify(temperature),
            },
            forecast: Vec::new(),
            hourly: Vec::new(),
        }
    }

    fn succeeded(id: u64, city: &str, temperature: f64) -> ViewEvent {
        ViewEvent::FetchSucceeded {
            request: RequestId::new(id),
            city: CityRef::named(city),
            position: None,
            report: report(temperature),
        }
    }

    #[test]
    fn started_sets_loading_and_clears_error() {
        let state = ViewState {
            error: Some("old".into()),
            ..Default::default()
        }
        .apply(ViewEvent::FetchStarted {
            request: RequestId::new(1),
        });

        assert!(state.loading);
        assert!(state.error.is_none());
        assert!(state.is_active(RequestId::new(1)));
    }

    #[test]
    fn success_replaces_city_and_report_together() {
        let state = ViewState::default()
            .apply(ViewEvent::FetchStarted {
                request: RequestId::new(1),
            })
            .apply(succeeded(1, "Kazan", 12.0));

        assert!(!state.loading);
        assert_eq!(state.city, Some(CityRef::named("Kazan")));
        assert_eq!(
            state.report.as_ref().map(|r| r.snapshot.temperature),
            Some(12.0)
        );
        assert!(state.active_request.is_none());
    }

    #[test]
    fn stale_success_is_ignored() {
        let state = ViewState::default()
            .apply(ViewEvent::FetchStarted {
                request: RequestId::new(1),
            })
            .apply(ViewEvent::FetchStarted {
                request: RequestId::new(2),
            })
            .apply(succeeded(1, "Moscow", 5.0));

        assert!(state.loading);
        assert!(state.city.is_none());
        assert!(state.report.is_none());

        let state = state.apply(succeeded(2, "Sochi", 25.0));
        assert_eq!(state.city, Some(CityRef::named("Sochi")));
    }

    #[test]
    fn stale_failure_is_ignored() {
        let state = ViewState::default()
            .apply(ViewEvent::FetchStarted {
                request: RequestId::new(3),
            })
            .apply(ViewEvent::FetchFailed {
                request: RequestId::new(2),
                message: "late".into(),
            });

        assert!(state.loading);
        assert!(state.error.is_none());
    }

    #[test]
    fn failure_clears_report_but_keeps_city() {
        let state = ViewState::default()
            .apply(ViewEvent::FetchStarted {
                request: RequestId::new(1),
            })
            .apply(succeeded(1, "Kazan", 12.0))
            .apply(ViewEvent::FetchStarted {
                request: RequestId::new(2),
            })
            .apply(ViewEvent::FetchFailed {
                request: RequestId::new(2),
                message: "City not found.".into(),
            });

        assert!(state.report.is_none());
        assert_eq!(state.city, Some(CityRef::named("Kazan")));
        assert_eq!(state.error.as_deref(), Some("City not found."));
        assert!(!state.loading);
    }

    #[test]
    fn location_failure_leaves_request_running() {
        let state = ViewState::default()
            .apply(ViewEvent::FetchStarted {
                request: RequestId::new(1),
            })
            .apply(ViewEvent::LocationFailed {
                message: "denied".into(),
            });

        assert!(state.loading);
        assert!(state.is_active(RequestId::new(1)));
        assert_eq!(state.location_error.as_deref(), Some("denied"));
        assert!(state.error.is_none());
    }

    #[test]
    fn location_failure_survives_default_city_fetch() {
        let state = ViewState::default()
            .apply(ViewEvent::LocationFailed {
                message: "Your location is unavailable.".into(),
            })
            .apply(ViewEvent::FetchStarted {
                request: RequestId::new(1),
            });
        assert_eq!(
            state.location_error.as_deref(),
            Some("Your location is unavailable.")
        );

        let state = state.apply(succeeded(1, "Moscow", 3.0));
        assert_eq!(
            state.location_error.as_deref(),
            Some("Your location is unavailable.")
        );
        assert!(state.error.is_none());

        let state = state
            .apply(ViewEvent::FetchStarted {
                request: RequestId::new(2),
            })
            .apply(ViewEvent::FetchSucceeded {
                request: RequestId::new(2),
                city: CityRef::named("Moscow"),
                position: Some(Coordinates::new(55.75, 37.62)),
                report: report(3.0),
            });
        assert!(state.location_error.is_none());
    }

    #[test]
    fn cancel_ends_loading_and_keeps_previous_view() {
        let state = ViewState::default()
            .apply(ViewEvent::FetchStarted {
                request: RequestId::new(1),
            })
            .apply(succeeded(1, "Kazan", 12.0))
            .apply(ViewEvent::FetchStarted {
                request: RequestId::new(2),
            });

        let event = ViewEvent::FetchCancelled {
            request: RequestId::new(2),
        };
        assert!(state.completes(&event));
        let state = state.apply(event);

        assert!(!state.loading);
        assert!(state.active_request.is_none());
        assert_eq!(state.city, Some(CityRef::named("Kazan")));
        assert!(state.report.is_some());
    }

    #[test]
    fn stale_cancel_is_ignored() {
        let state = ViewState::default()
            .apply(ViewEvent::FetchStarted {
                request: RequestId::new(2),
            })
            .apply(ViewEvent::FetchCancelled {
                request: RequestId::new(1),
            });

        assert!(state.loading);
        assert!(state.is_active(RequestId::new(2)));
    }

    #[test]
    fn completes_only_for_active_request() {
        let state = ViewState::default().apply(ViewEvent::FetchStarted {
            request: RequestId::new(4),
        });

        assert!(state.completes(&succeeded(4, "Omsk", 0.0)));
        assert!(!state.completes(&succeeded(3, "Omsk", 0.0)));
        assert!(!state.completes(&ViewEvent::FetchStarted {
            request: RequestId::new(4)
        }));
    }

    #[test]
    fn request_ids_order() {
        assert!(RequestId::new(2) > RequestId::new(1));
        assert_eq!(RequestId::new(7).to_string(), "#7");
    }
}
