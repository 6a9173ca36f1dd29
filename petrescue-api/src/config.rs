//! Client configuration: API origin, maps key and geocoding endpoint.
//!
//! The web build bakes values in at compile time (there is no process
//! environment in the browser); native builds read them at runtime. Both
//! fall back to a local development backend.

use petrescue_core::image::resolve_image_url;

pub const DEFAULT_API_ORIGIN: &str = "http://localhost:8000";
pub const API_PREFIX: &str = "/api/v1";
pub const DEFAULT_GEOCODE_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";

pub const API_URL_ENV: &str = "PETRESCUE_API_URL";
pub const MAPS_KEY_ENV: &str = "PETRESCUE_MAPS_KEY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_origin: String,
    maps_api_key: String,
    geocode_endpoint: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_ORIGIN)
    }
}

impl ClientConfig {
    /// Config for the given origin, e.g. `http://localhost:8000`.
    pub fn new(api_origin: impl Into<String>) -> Self {
        Self {
            api_origin: normalize_origin(&api_origin.into()),
            maps_api_key: String::new(),
            geocode_endpoint: DEFAULT_GEOCODE_ENDPOINT.to_string(),
        }
    }

    pub fn with_maps_key(mut self, key: impl Into<String>) -> Self {
        self.maps_api_key = key.into();
        self
    }

    pub fn with_geocode_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.geocode_endpoint = endpoint.into();
        self
    }

    /// Values captured from `PETRESCUE_API_URL` / `PETRESCUE_MAPS_KEY` when
    /// the crate was compiled. Used by the WASM app.
    pub fn from_build_env() -> Self {
        Self::from_values(option_env!("PETRESCUE_API_URL"), option_env!("PETRESCUE_MAPS_KEY"))
    }

    /// Values read from the process environment. Used by native tools.
    pub fn from_env() -> Self {
        let origin = std::env::var(API_URL_ENV).ok();
        let key = std::env::var(MAPS_KEY_ENV).ok();
        Self::from_values(origin.as_deref(), key.as_deref())
    }

    fn from_values(origin: Option<&str>, key: Option<&str>) -> Self {
        let origin = origin
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(DEFAULT_API_ORIGIN);
        let config = Self::new(origin);
        match key {
            Some(key) if !key.trim().is_empty() => config.with_maps_key(key.trim()),
            _ => config,
        }
    }

    pub fn api_origin(&self) -> &str {
        &self.api_origin
    }

    /// Versioned REST root, `{origin}/api/v1`.
    pub fn api_base(&self) -> String {
        format!("{}{}", self.api_origin, API_PREFIX)
    }

    pub fn maps_api_key(&self) -> &str {
        &self.maps_api_key
    }

    pub fn geocode_endpoint(&self) -> &str {
        &self.geocode_endpoint
    }

    /// See [`resolve_image_url`].
    pub fn image_url(&self, image_path: &str) -> Option<String> {
        resolve_image_url(&self.api_origin, image_path)
    }
}

fn normalize_origin(origin: &str) -> String {
    origin.trim().trim_end_matches('/').to_string()
}
