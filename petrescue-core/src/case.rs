//! Wire types exchanged with the PetRescue backend.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;
use crate::geo::{Coordinates, LatLng};
use crate::status::CaseStatus;

/// One reported animal case as returned by the backend.
///
/// The backend uses integer ids; they are normalized to strings on the way
/// in so the rest of the client never has to care about the representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimalCase {
    #[serde(deserialize_with = "deserialize_case_id")]
    pub id: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub status: CaseStatus,
}

impl AnimalCase {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCaseId {
    Number(serde_json::Number),
    Text(String),
}

/// Accept either a JSON number or a string id and keep it as a string.
fn deserialize_case_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawCaseId::deserialize(deserializer)? {
        RawCaseId::Number(n) => n.to_string(),
        RawCaseId::Text(s) => s,
    })
}

/// Payload for `POST /animals/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCase {
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl NewCase {
    /// Build a create payload. The description is trimmed and must not be
    /// empty; coordinates are already range-checked by [`Coordinates`].
    pub fn new(
        description: &str,
        coordinates: Coordinates,
        image_url: Option<String>,
    ) -> Result<Self, ValidationError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        Ok(Self {
            description: description.to_string(),
            latitude: coordinates.latitude(),
            longitude: coordinates.longitude(),
            image_url: image_url.filter(|url| !url.is_empty()),
        })
    }

    /// Re-check a payload that may not have come from [`NewCase::new`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.description.trim().is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        Coordinates::check_latitude(self.latitude)?;
        Coordinates::check_longitude(self.longitude)?;
        Ok(())
    }
}

/// Partial payload for `PUT /animals/{id}`. Absent fields are left out of
/// the JSON body entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CaseUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CaseStatus>,
}

impl CaseUpdate {
    pub fn status(status: CaseStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.latitude.is_none()
            && self.longitude.is_none()
            && self.image_url.is_none()
            && self.status.is_none()
    }

    /// Range-check whatever fields are present.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::EmptyUpdate);
        }
        if let Some(description) = &self.description {
            if description.trim().is_empty() {
                return Err(ValidationError::EmptyDescription);
            }
        }
        if let Some(lat) = self.latitude {
            Coordinates::check_latitude(lat)?;
        }
        if let Some(lng) = self.longitude {
            Coordinates::check_longitude(lng)?;
        }
        Ok(())
    }
}

/// Response of `POST /upload/image`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedImage {
    pub image_url: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub has_gps: bool,
}

impl UploadedImage {
    /// Coordinates extracted from the photo's EXIF block, if usable.
    pub fn gps(&self) -> Option<Coordinates> {
        if !self.has_gps {
            return None;
        }
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Coordinates::new(lat, lng).ok(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_are_normalized_to_strings() {
        let json = r#"{"id": 42, "description": "dog", "latitude": 4.7, "longitude": -74.0, "image_url": null, "status": "open"}"#;
        let case: AnimalCase = serde_json::from_str(json).unwrap();
        assert_eq!(case.id, "42");
        assert_eq!(case.image_url, None);
        assert_eq!(case.status, CaseStatus::Open);
    }

    #[test]
    fn string_ids_pass_through() {
        let json = r#"{"id": "abc-1", "description": "cat", "latitude": 1.0, "longitude": 2.0, "status": "in_progress"}"#;
        let case: AnimalCase = serde_json::from_str(json).unwrap();
        assert_eq!(case.id, "abc-1");
        assert_eq!(case.status, CaseStatus::InProgress);
    }

    #[test]
    fn missing_status_defaults_to_open() {
        let json = r#"{"id": 1, "description": "cat", "latitude": 1.0, "longitude": 2.0}"#;
        let case: AnimalCase = serde_json::from_str(json).unwrap();
        assert_eq!(case.status, CaseStatus::Open);
    }

    #[test]
    fn new_case_requires_description() {
        let coords = Coordinates::new(4.7, -74.0).unwrap();
        assert_eq!(
            NewCase::new("   ", coords, None),
            Err(ValidationError::EmptyDescription)
        );
    }

    #[test]
    fn new_case_omits_missing_image() {
        let coords = Coordinates::new(4.7, -74.0).unwrap();
        let payload = NewCase::new(" Injured dog ", coords, Some(String::new())).unwrap();
        assert_eq!(payload.description, "Injured dog");
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("image_url").is_none());
        assert_eq!(json["latitude"], 4.7);
    }

    #[test]
    fn hand_built_payload_is_range_checked() {
        let payload = NewCase {
            description: "cat".to_string(),
            latitude: 4.7,
            longitude: -200.0,
            image_url: None,
        };
        assert_eq!(
            payload.validate(),
            Err(ValidationError::LongitudeOutOfRange(-200.0))
        );
    }

    #[test]
    fn update_serializes_only_present_fields() {
        let update = CaseUpdate::status(CaseStatus::Resolved);
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"status": "resolved"}));
    }

    #[test]
    fn update_validation_checks_ranges() {
        let update = CaseUpdate {
            latitude: Some(95.0),
            ..CaseUpdate::default()
        };
        assert_eq!(update.validate(), Err(ValidationError::LatitudeOutOfRange(95.0)));
        assert_eq!(CaseUpdate::default().validate(), Err(ValidationError::EmptyUpdate));
    }

    #[test]
    fn upload_gps_requires_flag_and_both_values() {
        let with_gps: UploadedImage = serde_json::from_str(
            r#"{"image_url": "/uploads/a.jpg", "latitude": 4.6, "longitude": -74.1, "has_gps": true}"#,
        )
        .unwrap();
        let coords = with_gps.gps().unwrap();
        assert_eq!(coords.latitude(), 4.6);

        let without: UploadedImage = serde_json::from_str(
            r#"{"image_url": "/uploads/b.jpg", "latitude": null, "longitude": null, "has_gps": false}"#,
        )
        .unwrap();
        assert!(without.gps().is_none());
    }
}
