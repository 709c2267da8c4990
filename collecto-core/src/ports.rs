//! Traits describing the platform services the application relies on.

use async_trait::async_trait;
use reqwest::Error as ReqwestError;

use crate::model::GeoPoint;

#[derive(thiserror::Error, Debug)]
/// Errors that can occur while talking to platform or web services.
pub enum PortError {
    /// Network layer failed.
    #[error("Network error: {0}")]
    Network(#[from] ReqwestError),
    /// The user refused access to the position.
    #[error("Location permission denied")]
    PermissionDenied,
    /// No position could be determined.
    #[error("Position unavailable")]
    PositionUnavailable,
    /// The request did not complete in time.
    #[error("Request timed out")]
    Timeout,
    /// The service answered but had nothing for the request.
    #[error("Not found")]
    NotFound,
    /// Internal service error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[async_trait]
/// Source of the device position.
pub trait PositionPort: Send + Sync {
    /// Current position of the device.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when permission is denied or no fix is available.
    async fn current_position(&self) -> Result<GeoPoint, PortError>;
}

#[async_trait]
/// Backend turning coordinates into a city name.
pub trait ReverseGeocodePort: Send + Sync {
    /// Short name of the backend, used in logs.
    fn name(&self) -> &str;

    /// Name of the city containing `point`.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the request fails or no city is known there.
    async fn city_for(&self, point: GeoPoint) -> Result<String, PortError>;
}
