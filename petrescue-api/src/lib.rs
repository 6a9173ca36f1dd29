//! HTTP client for the PetRescue backend.
//!
//! [`ApiClient`] talks to the REST API (`/api/v1/animals/`, `/api/v1/upload/image`)
//! and the geocoding service. It compiles for both native targets (CLI,
//! tests) and `wasm32-unknown-unknown`, where reqwest goes through `fetch`.
//!
//! [`CaseApi`] abstracts the same operations so the view controllers can be
//! driven by an in-memory backend in tests.

pub mod client;
pub mod config;
pub mod error;
mod geocode;

pub use client::{ApiClient, ImageUpload};
pub use config::ClientConfig;
pub use error::ApiError;

use petrescue_core::{AnimalCase, CaseUpdate, Coordinates, NewCase, UploadedImage};

/// Backend operations the views depend on.
#[allow(async_fn_in_trait)]
pub trait CaseApi {
    /// All cases. Connectivity failures are errors; any other HTTP failure
    /// yields an empty list.
    async fn list_cases(&self) -> Result<Vec<AnimalCase>, ApiError>;

    async fn create_case(&self, case: &NewCase) -> Result<AnimalCase, ApiError>;

    async fn update_case(&self, id: &str, update: &CaseUpdate) -> Result<AnimalCase, ApiError>;

    async fn delete_case(&self, id: &str) -> Result<(), ApiError>;

    async fn upload_image(&self, upload: ImageUpload) -> Result<UploadedImage, ApiError>;

    /// First match for a free-text address, `None` when nothing was found.
    async fn geocode_address(&self, address: &str) -> Result<Option<Coordinates>, ApiError>;
}

impl CaseApi for ApiClient {
    async fn list_cases(&self) -> Result<Vec<AnimalCase>, ApiError> {
        ApiClient::list_cases(self).await
    }

    async fn create_case(&self, case: &NewCase) -> Result<AnimalCase, ApiError> {
        ApiClient::create_case(self, case).await
    }

    async fn update_case(&self, id: &str, update: &CaseUpdate) -> Result<AnimalCase, ApiError> {
        ApiClient::update_case(self, id, update).await
    }

    async fn delete_case(&self, id: &str) -> Result<(), ApiError> {
        ApiClient::delete_case(self, id).await
    }

    async fn upload_image(&self, upload: ImageUpload) -> Result<UploadedImage, ApiError> {
        ApiClient::upload_image(self, upload).await
    }

    async fn geocode_address(&self, address: &str) -> Result<Option<Coordinates>, ApiError> {
        ApiClient::geocode_address(self, address).await
    }
}
