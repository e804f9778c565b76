//! Weather backend: async fetching with last-request-wins semantics.
//! Network work runs on the tokio runtime; results come back over mpsc.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use weathervane_core::{AppError, Config};
use weathervane_weather::{
    CityRef, Coordinates, Geocoder, ProviderOptions, WeatherError, WeatherProvider, WeatherReport,
};

use crate::error_mapping::{user_message, IntoAppError};
use crate::state::{RequestId, ViewEvent};

/// A completed lookup
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome {
    pub city: CityRef,
    pub position: Option<Coordinates>,
    pub report: WeatherReport,
}

/// Messages sent from async operations back to the consumer loop
#[derive(Debug)]
pub enum WeatherServiceMessage {
    Started(RequestId),
    FetchDone {
        request: RequestId,
        result: Result<FetchOutcome, WeatherError>,
    },
    Cancelled(RequestId),
}

impl From<WeatherServiceMessage> for ViewEvent {
    fn from(message: WeatherServiceMessage) -> Self {
        match message {
            WeatherServiceMessage::Started(request) => ViewEvent::FetchStarted { request },
            WeatherServiceMessage::Cancelled(request) => ViewEvent::FetchCancelled { request },
            WeatherServiceMessage::FetchDone {
                request,
                result: Ok(outcome),
            } => ViewEvent::FetchSucceeded {
                request,
                city: outcome.city,
                position: outcome.position,
                report: outcome.report,
            },
            WeatherServiceMessage::FetchDone {
                request,
                result: Err(e),
            } => {
                tracing::warn!("Request {} failed: {}", request, e);
                ViewEvent::FetchFailed {
                    request,
                    message: user_message(e).to_string(),
                }
            }
        }
    }
}

pub struct WeatherService {
    provider: Arc<WeatherProvider>,
    geocoder: Arc<Geocoder>,
    runtime: Handle,
    tx: mpsc::UnboundedSender<WeatherServiceMessage>,
    next_id: AtomicU64,
    in_flight: Mutex<Option<(RequestId, CancellationToken)>>,
}

impl WeatherService {
    pub fn new(
        provider: WeatherProvider,
        geocoder: Geocoder,
        runtime: Handle,
    ) -> (Self, mpsc::UnboundedReceiver<WeatherServiceMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let service = Self {
            provider: Arc::new(provider),
            geocoder: Arc::new(geocoder),
            runtime,
            tx,
            next_id: AtomicU64::new(0),
            in_flight: Mutex::new(None),
        };
        (service, rx)
    }

    /// Build the provider and geocoder from configuration.
    ///
    /// Must be called from within a tokio runtime.
    pub fn from_config(
        config: &Config,
    ) -> Result<(Self, mpsc::UnboundedReceiver<WeatherServiceMessage>), AppError> {
        let timeout = Duration::from_secs(config.weather.timeout_seconds);

        let provider = WeatherProvider::new(
            config.weather.api_key.clone(),
            ProviderOptions {
                base_url: config.weather.base_url.clone(),
                lang: config.weather.lang.clone(),
                timeout,
            },
        )
        .map_err(IntoAppError::into_app_error)?;

        let geocoder = Geocoder::with_base_url(
            config.geocoding.api_key.clone(),
            &config.geocoding.base_url,
            timeout,
        )
        .map_err(IntoAppError::into_app_error)?;

        let runtime = Handle::try_current().map_err(|e| AppError::Other(e.into()))?;
        Ok(Self::new(provider, geocoder, runtime))
    }

    /// Fetch weather for a city typed in by name.
    pub fn request_city(&self, name: &str) -> RequestId {
        let (request, token) = self.begin();
        let provider = Arc::clone(&self.provider);
        let name = name.trim().to_string();

        tracing::info!("Request {}: weather for '{}'", request, name);
        self.spawn(request, token, async move {
            let report = provider.fetch_weather(&name).await?;
            Ok(FetchOutcome {
                city: CityRef::named(name),
                position: None,
                report,
            })
        });
        request
    }

    /// Resolve a position to a city, then fetch weather for it.
    pub fn request_position(&self, position: Coordinates) -> RequestId {
        let (request, token) = self.begin();
        let provider = Arc::clone(&self.provider);
        let geocoder = Arc::clone(&self.geocoder);

        tracing::info!(
            "Request {}: weather at {}, {}",
            request,
            position.latitude,
            position.longitude
        );
        self.spawn(request, token, async move {
            let city = geocoder.resolve_city(position).await?;
            let report = provider.fetch_weather(&city.name).await?;
            Ok(FetchOutcome {
                city,
                position: Some(position),
                report,
            })
        });
        request
    }

    /// Cancel the latest request, if any, and report it as `Cancelled`.
    ///
    /// A request that already finished is reported too; its id is no longer
    /// active, so consumers drop it.
    pub fn cancel(&self) {
        if let Some((request, token)) = self.in_flight.lock().take() {
            token.cancel();
            tracing::debug!("Request {} cancelled", request);
            let _ = self.tx.send(WeatherServiceMessage::Cancelled(request));
        }
    }

    /// Allocate an id, supersede the previous request and announce the new one.
    fn begin(&self) -> (RequestId, CancellationToken) {
        let request = RequestId::new(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let token = CancellationToken::new();

        if let Some((_, previous)) = self.in_flight.lock().replace((request, token.clone())) {
            previous.cancel();
        }

        let _ = self.tx.send(WeatherServiceMessage::Started(request));
        (request, token)
    }

    fn spawn<F>(&self, request: RequestId, token: CancellationToken, work: F)
    where
        F: std::future::Future<Output = Result<FetchOutcome, WeatherError>> + Send + 'static,
    {
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    tracing::debug!("Request {} cancelled before completion", request);
                }
                result = work => {
                    let _ = tx.send(WeatherServiceMessage::FetchDone { request, result });
                }
            }
        });
    }
}
