//! Map view: markers, heat zones and the display state around them.

use log::warn;
use petrescue_api::{ApiError, CaseApi, ClientConfig};
use petrescue_core::geo::map_center;
use petrescue_core::heat_zone::{heat_zones, ZoneOverlay};
use petrescue_core::refresh::{RefreshTrigger, RefreshWatcher};
use petrescue_core::{AnimalCase, CaseStatus, LatLng};
use serde::Serialize;

/// What the map area shows.
#[derive(Debug, Clone, PartialEq)]
pub enum MapDisplay {
    /// The map provider could not be loaded; nothing else is rendered.
    ProviderFailed(String),
    Loading,
    /// Fetch succeeded (or degraded) with nothing to show.
    Empty,
    Ready,
}

/// One marker as handed to the map bridge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerSpec {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    pub status: CaseStatus,
    pub label: &'static str,
    pub color: &'static str,
    pub description: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct MapView {
    cases: Vec<AnimalCase>,
    loading: bool,
    warning: Option<String>,
    provider_error: Option<String>,
    selected: Option<String>,
    watcher: RefreshWatcher,
}

impl MapView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cases(&self) -> &[AnimalCase] {
        &self.cases
    }

    /// Non-blocking banner shown over the map shell.
    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    pub fn needs_fetch(&mut self, trigger: &RefreshTrigger) -> bool {
        let stale = self.watcher.observe(trigger);
        if stale {
            self.loading = true;
        }
        stale
    }

    pub fn apply_fetch(&mut self, result: Result<Vec<AnimalCase>, ApiError>) {
        self.loading = false;
        match result {
            Ok(cases) => {
                self.cases = cases;
                self.warning = None;
            }
            Err(e) => {
                warn!("Failed to load cases for the map: {}", e);
                self.cases.clear();
                self.warning = Some(if e.is_network() {
                    "Could not reach the server. The map is shown without cases.".to_string()
                } else {
                    e.message()
                });
            }
        }
        if let Some(id) = &self.selected {
            if !self.cases.iter().any(|c| &c.id == id) {
                self.selected = None;
            }
        }
    }

    pub fn set_provider_failed(&mut self, message: impl Into<String>) {
        self.provider_error = Some(message.into());
    }

    pub fn display(&self) -> MapDisplay {
        if let Some(message) = &self.provider_error {
            return MapDisplay::ProviderFailed(message.clone());
        }
        // Refetches keep the current markers on screen.
        if self.loading && self.cases.is_empty() {
            return MapDisplay::Loading;
        }
        if self.cases.is_empty() {
            return MapDisplay::Empty;
        }
        MapDisplay::Ready
    }

    pub fn center(&self) -> LatLng {
        map_center(&self.cases)
    }

    /// One marker per case, with image URLs resolved against the API origin.
    pub fn markers(&self, config: &ClientConfig) -> Vec<MarkerSpec> {
        self.cases
            .iter()
            .map(|case| MarkerSpec {
                id: case.id.clone(),
                lat: case.latitude,
                lng: case.longitude,
                status: case.status,
                label: case.status.label(),
                color: case.status.color(),
                description: case.description.clone(),
                image_url: case
                    .image_url
                    .as_deref()
                    .and_then(|path| config.image_url(path)),
            })
            .collect()
    }

    pub fn zones(&self) -> Vec<ZoneOverlay> {
        heat_zones(&self.cases).iter().map(|z| z.overlay()).collect()
    }

    /// Open the info window for a marker.
    pub fn select(&mut self, id: &str) -> bool {
        if self.cases.iter().any(|c| c.id == id) {
            self.selected = Some(id.to_string());
            true
        } else {
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&AnimalCase> {
        let id = self.selected.as_deref()?;
        self.cases.iter().find(|c| c.id == id)
    }

    pub async fn sync<A: CaseApi>(&mut self, api: &A, trigger: &RefreshTrigger) -> bool {
        if !self.needs_fetch(trigger) {
            return false;
        }
        let result = api.list_cases().await;
        self.apply_fetch(result);
        true
    }
}
