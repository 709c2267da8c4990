//! Reverse geocoding provider using a Nominatim-compatible API.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use collecto_core::{
    model::GeoPoint,
    ports::{PortError, ReverseGeocodePort},
};

/// Public OpenStreetMap instance.
pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Response from /reverse?format=jsonv2
#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    address: Option<AddressParts>,
    // set instead of address when nothing is found, e.g. in the middle of the ocean
    #[serde(default)]
    error: Option<String>,
}

/// Subset of the `address` object; which key holds the city depends on its size.
#[derive(Debug, Default, Deserialize)]
struct AddressParts {
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    town: Option<String>,
    #[serde(default)]
    village: Option<String>,
    #[serde(default)]
    municipality: Option<String>,
}

impl AddressParts {
    fn into_city(self) -> Option<String> {
        [self.city, self.town, self.village, self.municipality]
            .into_iter()
            .flatten()
            .map(|name| name.trim().to_owned())
            .find(|name| !name.is_empty())
    }
}

/// Reverse geocoder bound to a Nominatim instance.
pub struct NominatimGeocoder {
    client: Client,
    base_url: String,
}

impl NominatimGeocoder {
    /// Create a geocoder for the public instance using the given HTTP client.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_owned(),
        }
    }

    /// Point the geocoder at another instance.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Instance the geocoder talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ReverseGeocodePort for NominatimGeocoder {
    fn name(&self) -> &str {
        "nominatim"
    }

    async fn city_for(&self, point: GeoPoint) -> Result<String, PortError> {
        if !point.is_valid() {
            return Err(PortError::Internal(format!(
                "coordinates out of range: {point}"
            )));
        }

        let req = self
            .client
            .get(format!("{}/reverse", self.base_url))
            .query(&[("lat", point.lat), ("lon", point.lon)])
            .query(&[("format", "jsonv2"), ("zoom", "10"), ("addressdetails", "1")]);

        let resp = fetch_json::<ReverseResponse>(req).await?;
        let city = city_from_response(resp)?;

        debug!(%point, %city, "reverse geocoded");
        Ok(city)
    }
}

/// Build a shareable geocoder for the given instance.
#[must_use]
pub fn geocoder(client: Client, base_url: &str) -> Arc<dyn ReverseGeocodePort> {
    Arc::new(NominatimGeocoder::new(client).with_base_url(base_url))
}

fn city_from_response(resp: ReverseResponse) -> Result<String, PortError> {
    if let Some(message) = resp.error {
        debug!(%message, "geocoder found nothing");
        return Err(PortError::NotFound);
    }

    resp.address
        .and_then(AddressParts::into_city)
        .ok_or(PortError::NotFound)
}

// Small helper to fetch and decode JSON with status handling.
async fn fetch_json<T: DeserializeOwned>(req: RequestBuilder) -> Result<T, PortError> {
    req.send()
        .await
        .map_err(PortError::from)?
        .error_for_status()
        .map_err(PortError::from)?
        .json()
        .await
        .map_err(PortError::from)
}
