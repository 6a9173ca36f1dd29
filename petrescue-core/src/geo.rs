//! Coordinates, validation and map centering.

use serde::Serialize;

use crate::case::AnimalCase;
use crate::error::ValidationError;

/// Map center used when there is nothing to show (Bogotá).
pub const FALLBACK_CENTER: LatLng = LatLng {
    lat: 4.711,
    lng: -74.0721,
};

/// A plain point in degree space. Not range-checked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Euclidean distance in coordinate degrees. Not geodesically corrected.
    pub fn distance_deg(&self, other: &LatLng) -> f64 {
        let dlat = self.lat - other.lat;
        let dlng = self.lng - other.lng;
        (dlat * dlat + dlng * dlng).sqrt()
    }

    /// Arithmetic mean of a set of points; `None` for an empty set.
    pub fn mean<I>(points: I) -> Option<LatLng>
    where
        I: IntoIterator<Item = LatLng>,
    {
        let (mut lat, mut lng, mut n) = (0.0, 0.0, 0usize);
        for p in points {
            lat += p.lat;
            lng += p.lng;
            n += 1;
        }
        if n == 0 {
            return None;
        }
        Some(LatLng::new(lat / n as f64, lng / n as f64))
    }
}

/// A latitude/longitude pair that passed range validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        Self::check_latitude(latitude)?;
        Self::check_longitude(longitude)?;
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parse the two text inputs of the report form.
    ///
    /// Either field left blank means no location was provided at all.
    pub fn parse(latitude: &str, longitude: &str) -> Result<Self, ValidationError> {
        let (lat, lng) = (latitude.trim(), longitude.trim());
        if lat.is_empty() || lng.is_empty() {
            return Err(ValidationError::MissingCoordinates);
        }
        let lat = parse_degrees("latitude", lat)?;
        let lng = parse_degrees("longitude", lng)?;
        Self::new(lat, lng)
    }

    pub fn check_latitude(value: f64) -> Result<(), ValidationError> {
        if value.is_finite() && (-90.0..=90.0).contains(&value) {
            Ok(())
        } else {
            Err(ValidationError::LatitudeOutOfRange(value))
        }
    }

    pub fn check_longitude(value: f64) -> Result<(), ValidationError> {
        if value.is_finite() && (-180.0..=180.0).contains(&value) {
            Ok(())
        } else {
            Err(ValidationError::LongitudeOutOfRange(value))
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn as_lat_lng(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }
}

fn parse_degrees(field: &'static str, value: &str) -> Result<f64, ValidationError> {
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ValidationError::NotANumber {
            field,
            value: value.to_string(),
        }),
    }
}

/// Where the map should be centered for a given case set.
///
/// No cases gives [`FALLBACK_CENTER`], one case centers on it, otherwise the
/// mean of all case coordinates.
pub fn map_center(cases: &[AnimalCase]) -> LatLng {
    match cases {
        [] => FALLBACK_CENTER,
        [only] => only.position(),
        _ => LatLng::mean(cases.iter().map(AnimalCase::position)).unwrap_or(FALLBACK_CENTER),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::CaseStatus;

    fn case_at(lat: f64, lng: f64) -> AnimalCase {
        AnimalCase {
            id: "1".to_string(),
            description: "dog".to_string(),
            latitude: lat,
            longitude: lng,
            image_url: None,
            status: CaseStatus::Open,
        }
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        assert_eq!(
            Coordinates::new(95.0, 0.0),
            Err(ValidationError::LatitudeOutOfRange(95.0))
        );
        assert_eq!(
            Coordinates::new(0.0, -200.0),
            Err(ValidationError::LongitudeOutOfRange(-200.0))
        );
        assert!(Coordinates::new(90.0, -180.0).is_ok());
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn parse_distinguishes_missing_from_garbage() {
        assert_eq!(
            Coordinates::parse("", "-74.0"),
            Err(ValidationError::MissingCoordinates)
        );
        assert_eq!(
            Coordinates::parse("abc", "-74.0"),
            Err(ValidationError::NotANumber {
                field: "latitude",
                value: "abc".to_string()
            })
        );
        let coords = Coordinates::parse(" 4.711 ", "-74.0721").unwrap();
        assert_eq!(coords.latitude(), 4.711);
        assert_eq!(coords.longitude(), -74.0721);
    }

    #[test]
    fn center_falls_back_when_empty() {
        assert_eq!(map_center(&[]), FALLBACK_CENTER);
    }

    #[test]
    fn center_on_single_case() {
        assert_eq!(map_center(&[case_at(1.5, 2.5)]), LatLng::new(1.5, 2.5));
    }

    #[test]
    fn center_on_mean_of_many() {
        let center = map_center(&[case_at(0.0, 0.0), case_at(2.0, 4.0), case_at(4.0, 8.0)]);
        assert_eq!(center, LatLng::new(2.0, 4.0));
    }

    #[test]
    fn distance_is_euclidean_in_degrees() {
        let a = LatLng::new(0.0, 0.0);
        let b = LatLng::new(3.0, 4.0);
        assert_eq!(a.distance_deg(&b), 5.0);
    }
}
