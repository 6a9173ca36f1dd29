//! In-memory backend for controller and command tests.
//!
//! Enabled in other crates through the `test-util` feature.

use std::cell::{Cell, RefCell};

use petrescue_api::{ApiError, CaseApi, ImageUpload};
use petrescue_core::{AnimalCase, CaseStatus, CaseUpdate, Coordinates, NewCase, UploadedImage};

#[derive(Default)]
pub struct FakeApi {
    pub cases: RefCell<Vec<AnimalCase>>,
    /// Returned (once) by the next call, whatever the operation.
    failure: RefCell<Option<ApiError>>,
    pub upload_result: RefCell<Option<UploadedImage>>,
    pub geocode_result: RefCell<Option<Coordinates>>,
    /// Every file passed to `upload_image`, in order.
    pub uploads: RefCell<Vec<ImageUpload>>,
    calls: RefCell<Vec<&'static str>>,
    next_id: Cell<u64>,
}

impl FakeApi {
    pub fn with_cases(cases: Vec<AnimalCase>) -> Self {
        let api = Self::default();
        *api.cases.borrow_mut() = cases;
        api
    }

    pub fn fail_next(&self, err: ApiError) {
        *self.failure.borrow_mut() = Some(err);
    }

    pub fn calls(&self, op: &str) -> usize {
        self.calls.borrow().iter().filter(|c| **c == op).count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn find(&self, id: &str) -> Option<AnimalCase> {
        self.cases.borrow().iter().find(|c| c.id == id).cloned()
    }

    fn enter(&self, op: &'static str) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(op);
        match self.failure.borrow_mut().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

pub fn not_found() -> ApiError {
    ApiError::Rejected {
        status: 404,
        payload: serde_json::json!({"detail": "Case not found"}),
    }
}

pub fn case(id: &str, lat: f64, lng: f64, status: CaseStatus) -> AnimalCase {
    AnimalCase {
        id: id.to_string(),
        description: format!("case {id}"),
        latitude: lat,
        longitude: lng,
        image_url: None,
        status,
    }
}

impl CaseApi for FakeApi {
    async fn list_cases(&self) -> Result<Vec<AnimalCase>, ApiError> {
        self.enter("list")?;
        Ok(self.cases.borrow().clone())
    }

    async fn create_case(&self, new: &NewCase) -> Result<AnimalCase, ApiError> {
        self.enter("create")?;
        let id = self.next_id.get() + 100;
        self.next_id.set(self.next_id.get() + 1);
        let created = AnimalCase {
            id: id.to_string(),
            description: new.description.clone(),
            latitude: new.latitude,
            longitude: new.longitude,
            image_url: new.image_url.clone(),
            status: CaseStatus::Open,
        };
        self.cases.borrow_mut().push(created.clone());
        Ok(created)
    }

    async fn update_case(&self, id: &str, update: &CaseUpdate) -> Result<AnimalCase, ApiError> {
        self.enter("update")?;
        update.validate()?;
        let mut cases = self.cases.borrow_mut();
        let case = cases.iter_mut().find(|c| c.id == id).ok_or_else(not_found)?;
        if let Some(description) = &update.description {
            case.description = description.clone();
        }
        if let Some(lat) = update.latitude {
            case.latitude = lat;
        }
        if let Some(lng) = update.longitude {
            case.longitude = lng;
        }
        if let Some(url) = &update.image_url {
            case.image_url = Some(url.clone());
        }
        if let Some(status) = update.status {
            case.status = status;
        }
        Ok(case.clone())
    }

    async fn delete_case(&self, id: &str) -> Result<(), ApiError> {
        self.enter("delete")?;
        let mut cases = self.cases.borrow_mut();
        let before = cases.len();
        cases.retain(|c| c.id != id);
        if cases.len() == before {
            return Err(not_found());
        }
        Ok(())
    }

    async fn upload_image(&self, upload: ImageUpload) -> Result<UploadedImage, ApiError> {
        self.enter("upload")?;
        self.uploads.borrow_mut().push(upload);
        Ok(self
            .upload_result
            .borrow()
            .clone()
            .unwrap_or_else(|| UploadedImage {
                image_url: "/uploads/fake.jpg".to_string(),
                latitude: None,
                longitude: None,
                has_gps: false,
            }))
    }

    async fn geocode_address(&self, _address: &str) -> Result<Option<Coordinates>, ApiError> {
        self.enter("geocode")?;
        Ok(*self.geocode_result.borrow())
    }
}
