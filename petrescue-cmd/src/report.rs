//! Creating cases and address lookups.

use std::io::Write;
use std::path::Path;

use anyhow::{anyhow, bail, Context};
use petrescue_api::{CaseApi, ImageUpload};
use petrescue_core::{Coordinates, ValidationError};
use petrescue_views::ReportForm;

use crate::cases::case_line;

/// Flags of `report`, before validation.
#[derive(Debug, Clone, Default)]
pub struct ReportRequest {
    pub description: String,
    /// Explicit `(lat, lng)`; wins over photo GPS and the address.
    pub coordinates: Option<(f64, f64)>,
    pub address: Option<String>,
    pub image: Option<String>,
}

/// Mime type for the upload, from the file extension.
pub fn content_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "heic" => Some("image/heic"),
        _ => None,
    }
}

fn read_image(path: &str) -> anyhow::Result<ImageUpload> {
    let path = Path::new(path);
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image")
        .to_string();
    Ok(ImageUpload {
        file_name,
        content_type: content_type_for(path).map(str::to_string),
        bytes,
    })
}

/// Fail with the form's message when its last step went wrong.
fn check(form: &ReportForm) -> anyhow::Result<()> {
    match form.notice() {
        Some(notice) if notice.is_error() => Err(anyhow!(notice.message.clone())),
        _ => Ok(()),
    }
}

/// Validate, upload the photo if any, resolve a location and create the case.
///
/// Location precedence: explicit coordinates, then the photo's GPS, then the
/// geocoded address.
pub async fn report<A: CaseApi, W: Write>(
    api: &A,
    request: ReportRequest,
    out: &mut W,
) -> anyhow::Result<()> {
    if request.description.trim().is_empty() {
        return Err(ValidationError::EmptyDescription.into());
    }
    let explicit = request
        .coordinates
        .map(|(lat, lng)| Coordinates::new(lat, lng))
        .transpose()?;
    if explicit.is_none() && request.address.is_none() && request.image.is_none() {
        return Err(ValidationError::MissingCoordinates.into());
    }
    let upload = request.image.as_deref().map(read_image).transpose()?;

    let mut form = ReportForm::new();
    form.description = request.description;

    if let Some(upload) = upload {
        log::info!("Uploading {} ({} bytes)", upload.file_name, upload.bytes.len());
        form.upload(api, upload, None).await?;
        check(&form)?;
    }
    if let Some(coords) = explicit {
        form.latitude = coords.latitude().to_string();
        form.longitude = coords.longitude().to_string();
    }
    if form.coordinates().is_none() {
        let Some(address) = request.address else {
            bail!("the photo has no GPS data; pass --lat/--lng or --address");
        };
        form.address = address;
        form.geocode(api).await?;
        check(&form)?;
    }

    let payload = form.prepare_submission()?;
    let created = api.create_case(&payload).await;
    let line = created.as_ref().ok().map(case_line);
    if !form.finish_submission(created) {
        check(&form)?;
        bail!("the case was not created");
    }
    if let Some(line) = line {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

pub async fn geocode<A: CaseApi, W: Write>(api: &A, address: &str, out: &mut W) -> anyhow::Result<()> {
    match api.geocode_address(address).await? {
        Some(coords) => writeln!(out, "{:.6},{:.6}", coords.latitude(), coords.longitude())?,
        None => writeln!(out, "not found")?,
    }
    Ok(())
}
