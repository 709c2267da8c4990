//! Device position and city resolution with graceful fallbacks.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::model::{GeoPoint, LocationReading};
use crate::ports::{PortError, PositionPort, ReverseGeocodePort};

/// City shown when reverse geocoding fails.
pub const DEFAULT_FALLBACK_CITY: &str = "Unknown city";

/// Upper bound for a single position or geocoding request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Position source returning a configured point.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPosition {
    point: Option<GeoPoint>,
}

impl FixedPosition {
    /// Source answering with `point`, or unavailable when `None`.
    #[must_use]
    pub fn new(point: Option<GeoPoint>) -> Self {
        Self { point }
    }
}

#[async_trait]
impl PositionPort for FixedPosition {
    async fn current_position(&self) -> Result<GeoPoint, PortError> {
        self.point.ok_or(PortError::PositionUnavailable)
    }
}

/// Combines a position source and a reverse geocoder into a single reading.
pub struct LocationService {
    position: Arc<dyn PositionPort>,
    geocoder: Arc<dyn ReverseGeocodePort>,
    timeout: Duration,
    fallback_city: String,
}

impl LocationService {
    /// Create a service with the default timeout and fallback city.
    #[must_use]
    pub fn new(position: Arc<dyn PositionPort>, geocoder: Arc<dyn ReverseGeocodePort>) -> Self {
        Self {
            position,
            geocoder,
            timeout: DEFAULT_TIMEOUT,
            fallback_city: DEFAULT_FALLBACK_CITY.to_owned(),
        }
    }

    /// Replace the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replace the city reported when geocoding fails.
    #[must_use]
    pub fn with_fallback_city(mut self, city: impl Into<String>) -> Self {
        self.fallback_city = city.into();
        self
    }

    /// Current position, or `None` when it is denied, unavailable, or too slow.
    pub async fn current_position(&self) -> Option<GeoPoint> {
        match timeout(self.timeout, self.position.current_position()).await {
            Ok(Ok(point)) => {
                debug!(%point, "got device position");
                Some(point)
            }
            Ok(Err(err)) => {
                warn!(error = %err, "could not get device position");
                None
            }
            Err(_elapsed) => {
                warn!(timeout = ?self.timeout, "device position timed out");
                None
            }
        }
    }

    /// City containing `point`, or the fallback city when the geocoder fails.
    pub async fn city_for(&self, point: GeoPoint) -> String {
        let result = match timeout(self.timeout, self.geocoder.city_for(point)).await {
            Ok(result) => result,
            Err(_elapsed) => Err(PortError::Timeout),
        };

        match result {
            Ok(city) => city,
            Err(err) => {
                warn!(
                    geocoder = self.geocoder.name(),
                    error = %err,
                    fallback = %self.fallback_city,
                    "reverse geocoding failed"
                );
                self.fallback_city.clone()
            }
        }
    }

    /// Position and city of the device, or `None` when no position is available.
    pub async fn current_location(&self) -> Option<LocationReading> {
        let point = self.current_position().await?;
        let city = self.city_for(point).await;
        Some(LocationReading { point, city })
    }
}
