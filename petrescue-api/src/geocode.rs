//! Address lookup through the Google Geocoding web service.

use log::{debug, warn};
use petrescue_core::{Coordinates, ValidationError};
use serde::Deserialize;

use crate::client::ApiClient;
use crate::error::ApiError;

#[derive(Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Deserialize)]
struct Geometry {
    location: Location,
}

#[derive(Deserialize)]
struct Location {
    lat: f64,
    lng: f64,
}

impl ApiClient {
    /// Geocode a free-text address; the first result wins.
    ///
    /// Blank input is rejected without a request. A provider answer other
    /// than `OK` with at least one result, or an unreadable body, is `None`.
    /// Only a connectivity failure is an error.
    pub async fn geocode_address(&self, address: &str) -> Result<Option<Coordinates>, ApiError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(ValidationError::EmptyAddress.into());
        }

        let endpoint = self.config().geocode_endpoint();
        debug!("GET {} address={:?}", endpoint, address);
        let response = self
            .http()
            .get(endpoint)
            .query(&[("address", address), ("key", self.config().maps_api_key())])
            .send()
            .await
            .map_err(|e| {
                warn!("Geocoding request failed: {}", e);
                ApiError::network(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Geocoder returned {}", status);
            return Ok(None);
        }
        let body = response.bytes().await.map_err(ApiError::network)?;
        Ok(first_location(&body))
    }
}

fn first_location(body: &[u8]) -> Option<Coordinates> {
    let parsed: GeocodeResponse = match serde_json::from_slice(body) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("Unreadable geocoder response: {}", e);
            return None;
        }
    };
    if parsed.status != "OK" {
        debug!("Geocoder status {}", parsed.status);
        return None;
    }
    let location = &parsed.results.first()?.geometry.location;
    Coordinates::new(location.lat, location.lng).ok()
}
