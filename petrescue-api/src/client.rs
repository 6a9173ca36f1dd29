//! REST calls against `{origin}/api/v1`.

use log::{debug, error, warn};
use petrescue_core::{AnimalCase, CaseUpdate, NewCase, UploadedImage};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::ApiError;

/// A photo picked in the report form, ready to be sent as multipart.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Backend client. Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    config: ClientConfig,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_http(Client::new(), config)
    }

    pub fn with_http(http: Client, config: ClientConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base(), path)
    }

    /// `GET /animals/`.
    ///
    /// Only a connectivity failure is reported as an error. Any other HTTP
    /// error status is treated as "no cases yet" and logged.
    pub async fn list_cases(&self) -> Result<Vec<AnimalCase>, ApiError> {
        let url = self.url("/animals/");
        debug!("GET {}", url);
        let response = match self.http.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Listing cases failed, backend unreachable: {}", e);
                return Err(ApiError::network(e));
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!("Listing cases returned {}; showing an empty list", status);
            return Ok(Vec::new());
        }

        let body = response.bytes().await.map_err(ApiError::network)?;
        parse_case_list(&body)
    }

    /// `POST /animals/`. Invalid payloads are rejected locally; the server's
    /// error payload is propagated as-is.
    pub async fn create_case(&self, case: &NewCase) -> Result<AnimalCase, ApiError> {
        case.validate()?;
        let url = self.url("/animals/");
        debug!("POST {}", url);
        let response = self
            .http
            .post(&url)
            .json(case)
            .send()
            .await
            .map_err(|e| log_write_failure("create case", e))?;
        read_json(response).await
    }

    /// `PUT /animals/{id}` with only the fields present in `update`.
    pub async fn update_case(&self, id: &str, update: &CaseUpdate) -> Result<AnimalCase, ApiError> {
        update.validate()?;
        let url = self.url(&format!("/animals/{id}"));
        debug!("PUT {}", url);
        let response = self
            .http
            .put(&url)
            .json(update)
            .send()
            .await
            .map_err(|e| log_write_failure("update case", e))?;
        read_json(response).await
    }

    /// `DELETE /animals/{id}`.
    pub async fn delete_case(&self, id: &str) -> Result<(), ApiError> {
        let url = self.url(&format!("/animals/{id}"));
        debug!("DELETE {}", url);
        let response = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(|e| log_write_failure("delete case", e))?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.bytes().await.map_err(ApiError::network)?;
        Err(ApiError::rejected(status.as_u16(), &body))
    }

    /// `POST /upload/image` as multipart with a single `file` field.
    pub async fn upload_image(&self, upload: ImageUpload) -> Result<UploadedImage, ApiError> {
        let ImageUpload {
            file_name,
            content_type,
            bytes,
        } = upload;

        let part = Part::bytes(bytes).file_name(file_name);
        let part = match content_type {
            Some(mime) => part
                .mime_str(&mime)
                .map_err(|e| ApiError::Request(format!("bad content type {mime:?}: {e}")))?,
            None => part,
        };
        let form = Form::new().part("file", part);

        let url = self.url("/upload/image");
        debug!("POST {} (multipart)", url);
        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| log_write_failure("upload image", e))?;
        read_json(response).await
    }
}

fn log_write_failure(action: &str, err: reqwest::Error) -> ApiError {
    error!("Failed to {}: {}", action, err);
    ApiError::network(err)
}

/// Decode a success body, or turn an error status into [`ApiError::Rejected`].
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.bytes().await.map_err(ApiError::network)?;
    if !status.is_success() {
        warn!("Request rejected with {}", status);
        return Err(ApiError::rejected(status.as_u16(), &body));
    }
    serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// A list body of `null` or nothing at all is an empty list.
fn parse_case_list(body: &[u8]) -> Result<Vec<AnimalCase>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    let cases: Option<Vec<AnimalCase>> =
        serde_json::from_slice(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok(cases.unwrap_or_default())
}
