//! Proximity clustering of active cases into heat zones.
//!
//! Zones are derived on every render from the current case set and carry no
//! identity of their own. The join rule is single-pass and order dependent:
//! a case joins the *first* existing zone whose running center lies within
//! [`HEAT_ZONE_RADIUS_DEG`], so the same set fetched in a different order can
//! produce different zones.

use serde::Serialize;

use crate::case::AnimalCase;
use crate::geo::LatLng;

/// Join radius in coordinate degrees (roughly 500 m near the equator).
pub const HEAT_ZONE_RADIUS_DEG: f64 = 0.005;

/// Visual weight of a zone, a step function of its member count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneIntensity {
    Low,
    Medium,
    High,
}

impl ZoneIntensity {
    pub fn from_count(count: usize) -> Self {
        match count {
            0..=2 => ZoneIntensity::Low,
            3..=4 => ZoneIntensity::Medium,
            _ => ZoneIntensity::High,
        }
    }

    /// Circle radius on the map, in meters.
    pub fn radius_m(self) -> f64 {
        match self {
            ZoneIntensity::Low => 200.0,
            ZoneIntensity::Medium => 350.0,
            ZoneIntensity::High => 500.0,
        }
    }

    pub fn fill_color(self) -> &'static str {
        match self {
            ZoneIntensity::Low => "#10b981",
            ZoneIntensity::Medium => "#f59e0b",
            ZoneIntensity::High => "#ef4444",
        }
    }

    pub fn fill_opacity(self) -> f64 {
        match self {
            ZoneIntensity::Low => 0.15,
            ZoneIntensity::Medium => 0.25,
            ZoneIntensity::High => 0.35,
        }
    }
}

/// A cluster of nearby active cases.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatZone<'a> {
    pub center: LatLng,
    pub members: Vec<&'a AnimalCase>,
}

impl HeatZone<'_> {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn intensity(&self) -> ZoneIntensity {
        ZoneIntensity::from_count(self.members.len())
    }

    /// Owned, serializable form handed to the map bridge.
    pub fn overlay(&self) -> ZoneOverlay {
        let intensity = self.intensity();
        ZoneOverlay {
            lat: self.center.lat,
            lng: self.center.lng,
            count: self.members.len(),
            intensity,
            radius_m: intensity.radius_m(),
            fill_color: intensity.fill_color(),
            fill_opacity: intensity.fill_opacity(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneOverlay {
    pub lat: f64,
    pub lng: f64,
    pub count: usize,
    pub intensity: ZoneIntensity,
    pub radius_m: f64,
    pub fill_color: &'static str,
    pub fill_opacity: f64,
}

/// Cluster the active cases using [`HEAT_ZONE_RADIUS_DEG`].
pub fn heat_zones(cases: &[AnimalCase]) -> Vec<HeatZone<'_>> {
    heat_zones_within(cases, HEAT_ZONE_RADIUS_DEG)
}

/// Cluster the active cases with an explicit join radius.
pub fn heat_zones_within(cases: &[AnimalCase], radius_deg: f64) -> Vec<HeatZone<'_>> {
    let mut zones: Vec<HeatZone<'_>> = Vec::new();

    for case in cases.iter().filter(|c| c.is_active()) {
        let point = case.position();
        match zones
            .iter_mut()
            .find(|zone| zone.center.distance_deg(&point) < radius_deg)
        {
            Some(zone) => {
                zone.members.push(case);
                zone.center = LatLng::mean(zone.members.iter().map(|m| m.position()))
                    .unwrap_or(point);
            }
            None => zones.push(HeatZone {
                center: point,
                members: vec![case],
            }),
        }
    }

    // A zone only ever counts cases that still need attention.
    for zone in &mut zones {
        zone.members.retain(|m| m.is_active());
    }
    zones.retain(|zone| !zone.is_empty());

    log::debug!(
        "clustered {} cases into {} heat zones",
        cases.len(),
        zones.len()
    );
    zones
}
