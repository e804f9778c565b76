//! Sources of the device position.

use std::future::Future;
use std::time::Duration;

use crate::types::{Coordinates, LocationError};

/// Anything that can report where the user is
pub trait LocationSource: Send + Sync {
    fn current_location(&self) -> impl Future<Output = Result<Coordinates, LocationError>> + Send;
}

/// Position taken from configuration or the command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticLocation {
    position: Option<Coordinates>,
}

impl StaticLocation {
    pub fn new(position: Option<Coordinates>) -> Self {
        Self { position }
    }

    /// Both halves must be present; a lone latitude or longitude is ignored.
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Self {
        Self::new(latitude.zip(longitude).map(|(lat, lon)| Coordinates::new(lat, lon)))
    }
}

impl LocationSource for StaticLocation {
    async fn current_location(&self) -> Result<Coordinates, LocationError> {
        match self.position {
            Some(position) if position.is_valid() => Ok(position),
            Some(position) => Err(LocationError::Other(format!(
                "invalid coordinates {}, {}",
                position.latitude, position.longitude
            ))),
            None => Err(LocationError::Unavailable),
        }
    }
}

/// Ask `source` for a position, giving up after `limit`.
pub async fn locate<L: LocationSource>(
    source: &L,
    limit: Duration,
) -> Result<Coordinates, LocationError> {
    match tokio::time::timeout(limit, source.current_location()).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!("Location lookup timed out after {:?}", limit);
            Err(LocationError::Timeout)
        }
    }
}
