//! Report form: collects a new case and submits it.
//!
//! Phases per submission:
//!
//! ```text
//! Idle -> UploadingImage -> Idle (image kept) -> Submitting -> Idle (reset)
//!                                                           \-> Idle (error notice)
//! ```
//!
//! The image upload runs as soon as a file is picked, independent of the
//! submit button. Location can come from the device, from geocoding an
//! address, or from manual entry; all three end up in the same two text
//! fields and are validated together at submit time.

use log::{info, warn};
use petrescue_api::{ApiError, CaseApi, ImageUpload};
use petrescue_core::locate::{LocateError, LocationFix};
use petrescue_core::{AnimalCase, Coordinates, NewCase, UploadedImage, ValidationError};
use thiserror::Error;

use crate::notice::Notice;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Idle,
    UploadingImage,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("please wait for the current operation to finish")]
    Busy,

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// The picked file as shown in the form.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedImage {
    pub file_name: String,
    /// Object URL of the local preview, revoked by the UI when dropped.
    pub preview_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportForm {
    pub description: String,
    pub address: String,
    pub latitude: String,
    pub longitude: String,
    manual_coords: bool,
    image: Option<SelectedImage>,
    image_url: Option<String>,
    phase: FormPhase,
    locating: bool,
    geocoding: bool,
    /// Lookups started before the last reset; their results are dropped.
    stale_locate: bool,
    stale_geocode: bool,
    notice: Option<Notice>,
}

impl ReportForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase != FormPhase::Idle
    }

    pub fn is_locating(&self) -> bool {
        self.locating
    }

    pub fn is_geocoding(&self) -> bool {
        self.geocoding
    }

    pub fn image(&self) -> Option<&SelectedImage> {
        self.image.as_ref()
    }

    /// Server path of the uploaded photo, once the upload succeeded.
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    pub fn manual_coords(&self) -> bool {
        self.manual_coords
    }

    pub fn toggle_manual_coords(&mut self) {
        self.manual_coords = !self.manual_coords;
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    /// Coordinates currently in the form, if both parse and are in range.
    pub fn coordinates(&self) -> Option<Coordinates> {
        Coordinates::parse(&self.latitude, &self.longitude).ok()
    }

    fn set_coordinates(&mut self, coords: Coordinates) {
        self.latitude = coords.latitude().to_string();
        self.longitude = coords.longitude().to_string();
    }

    /// Start uploading a newly picked file.
    ///
    /// Returns the preview URL of a previously selected image, which the
    /// caller should revoke.
    pub fn begin_upload(
        &mut self,
        file_name: &str,
        preview_url: Option<String>,
    ) -> Result<Option<String>, FormError> {
        if self.is_busy() {
            return Err(FormError::Busy);
        }
        let replaced = self.image.take().and_then(|img| img.preview_url);
        self.image = Some(SelectedImage {
            file_name: file_name.to_string(),
            preview_url,
        });
        self.image_url = None;
        self.phase = FormPhase::UploadingImage;
        self.notice = Some(Notice::info("Uploading image..."));
        Ok(replaced)
    }

    /// Fold the upload response in.
    ///
    /// On failure the selection is rolled back and the preview URL to revoke
    /// is returned.
    pub fn finish_upload(&mut self, result: Result<UploadedImage, ApiError>) -> Option<String> {
        self.phase = FormPhase::Idle;
        match result {
            Ok(uploaded) => {
                let gps = uploaded.gps();
                self.image_url = Some(uploaded.image_url);
                match gps {
                    Some(coords) => {
                        self.set_coordinates(coords);
                        self.notice = Some(Notice::success(
                            "Image uploaded. Location taken from the photo.",
                        ));
                    }
                    None => self.notice = Some(Notice::success("Image uploaded")),
                }
                None
            }
            Err(e) => {
                warn!("Failed to upload image: {}", e);
                self.image_url = None;
                self.notice = Some(Notice::error(format!(
                    "Failed to upload image: {}",
                    e.message()
                )));
                self.image.take().and_then(|img| img.preview_url)
            }
        }
    }

    /// Drop the picked image. Returns its preview URL for revocation.
    pub fn remove_image(&mut self) -> Option<String> {
        if self.phase == FormPhase::UploadingImage {
            return None;
        }
        self.image_url = None;
        self.image.take().and_then(|img| img.preview_url)
    }

    /// Validate the address and mark the lookup as pending.
    pub fn begin_geocode(&mut self) -> Result<String, FormError> {
        if self.geocoding {
            return Err(FormError::Busy);
        }
        let address = self.address.trim();
        if address.is_empty() {
            let err = ValidationError::EmptyAddress;
            self.notice = Some(Notice::error(err.to_string()));
            return Err(err.into());
        }
        let address = address.to_string();
        self.geocoding = true;
        self.notice = Some(Notice::info("Looking up address..."));
        Ok(address)
    }

    pub fn finish_geocode(&mut self, result: Result<Option<Coordinates>, ApiError>) {
        self.geocoding = false;
        if std::mem::take(&mut self.stale_geocode) {
            info!("Dropping address lookup started before the form was reset");
            return;
        }
        self.notice = Some(match result {
            Ok(Some(coords)) => {
                self.set_coordinates(coords);
                Notice::success("Address located")
            }
            Ok(None) => Notice::error("Address not found; try a more specific one"),
            Err(e) => Notice::error(format!("Failed to look up address: {}", e.message())),
        });
    }

    /// Mark a device fix as pending. False if one is already in flight.
    pub fn begin_locate(&mut self) -> bool {
        if self.locating {
            return false;
        }
        self.locating = true;
        self.notice = Some(Notice::info("Getting your location..."));
        true
    }

    pub fn finish_locate(&mut self, result: Result<LocationFix, LocateError>) {
        self.locating = false;
        if std::mem::take(&mut self.stale_locate) {
            info!("Dropping device fix requested before the form was reset");
            return;
        }
        let fix = match result {
            Ok(fix) => fix,
            Err(e) => {
                self.notice = Some(Notice::error(e.to_string()));
                return;
            }
        };
        match Coordinates::new(fix.latitude, fix.longitude) {
            Ok(coords) => {
                self.set_coordinates(coords);
                self.notice = Some(Notice::success(format!(
                    "Location acquired (accuracy {:.0} m)",
                    fix.accuracy
                )));
            }
            Err(e) => self.notice = Some(Notice::error(e.to_string())),
        }
    }

    /// Validate the form and move to `Submitting`.
    ///
    /// Nothing is sent unless this returns `Ok`.
    pub fn prepare_submission(&mut self) -> Result<NewCase, FormError> {
        if self.is_busy() {
            return Err(FormError::Busy);
        }
        match self.validate() {
            Ok(payload) => {
                self.phase = FormPhase::Submitting;
                self.notice = Some(Notice::info("Creating case..."));
                Ok(payload)
            }
            Err(e) => {
                self.notice = Some(Notice::error(e.to_string()));
                Err(e.into())
            }
        }
    }

    fn validate(&self) -> Result<NewCase, ValidationError> {
        if self.description.trim().is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        let coords = Coordinates::parse(&self.latitude, &self.longitude)?;
        NewCase::new(&self.description, coords, self.image_url.clone())
    }

    /// Fold the create response in. Returns true when the case was created
    /// and the other views should refresh.
    pub fn finish_submission(&mut self, result: Result<AnimalCase, ApiError>) -> bool {
        self.phase = FormPhase::Idle;
        match result {
            Ok(created) => {
                info!("Created case {}", created.id);
                // Lookups still in flight keep their controls disabled but
                // must not fill the fresh form.
                *self = Self {
                    locating: self.locating,
                    geocoding: self.geocoding,
                    stale_locate: self.locating,
                    stale_geocode: self.geocoding,
                    notice: Some(Notice::success("Case reported. Thank you!")),
                    ..Self::default()
                };
                true
            }
            Err(e) => {
                self.notice = Some(Notice::error(format!(
                    "Failed to create case: {}",
                    e.message()
                )));
                false
            }
        }
    }

    /// Upload a picked file end to end.
    pub async fn upload<A: CaseApi>(
        &mut self,
        api: &A,
        upload: ImageUpload,
        preview_url: Option<String>,
    ) -> Result<Option<String>, FormError> {
        self.begin_upload(&upload.file_name, preview_url)?;
        let result = api.upload_image(upload).await;
        Ok(self.finish_upload(result))
    }

    pub async fn geocode<A: CaseApi>(&mut self, api: &A) -> Result<(), FormError> {
        let address = self.begin_geocode()?;
        let result = api.geocode_address(&address).await;
        self.finish_geocode(result);
        Ok(())
    }

    /// Validate and create the case. Returns true on success.
    pub async fn submit<A: CaseApi>(&mut self, api: &A) -> bool {
        let payload = match self.prepare_submission() {
            Ok(payload) => payload,
            Err(_) => return false,
        };
        let result = api.create_case(&payload).await;
        self.finish_submission(result)
    }
}
