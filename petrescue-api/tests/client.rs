//! Client behavior against a local stub backend.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use petrescue_api::{ApiClient, ApiError, ClientConfig, ImageUpload};
use petrescue_core::{CaseStatus, CaseUpdate, Coordinates, NewCase, ValidationError};
use serde_json::{json, Value};

#[derive(Clone, Default)]
struct Recorder {
    hits: Arc<AtomicUsize>,
    last_body: Arc<Mutex<Option<Value>>>,
}

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

async fn client_for(router: Router) -> ApiClient {
    let origin = serve(router).await;
    ApiClient::new(ClientConfig::new(origin))
}

/// An origin nothing is listening on.
async fn dead_origin() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

fn case_json(id: i64, status: &str) -> Value {
    json!({
        "id": id,
        "description": format!("case {id}"),
        "latitude": 4.7,
        "longitude": -74.0,
        "image_url": null,
        "status": status,
    })
}

#[tokio::test]
async fn list_normalizes_ids() {
    let router = Router::new().route(
        "/api/v1/animals/",
        get(|| async { Json(json!([case_json(1, "open"), case_json(22, "in_progress")])) }),
    );
    let client = client_for(router).await;

    let cases = client.list_cases().await.unwrap();
    assert_eq!(cases.len(), 2);
    assert_eq!(cases[0].id, "1");
    assert_eq!(cases[1].id, "22");
    assert_eq!(cases[1].status, CaseStatus::InProgress);
}

#[tokio::test]
async fn list_swallows_http_errors() {
    let router = Router::new().route(
        "/api/v1/animals/",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let client = client_for(router).await;
    assert_eq!(client.list_cases().await, Ok(Vec::new()));

    // No route at all: a 404 is also "no cases".
    let client = client_for(Router::new()).await;
    assert_eq!(client.list_cases().await, Ok(Vec::new()));
}

#[tokio::test]
async fn list_treats_null_as_empty() {
    let router = Router::new().route("/api/v1/animals/", get(|| async { Json(Value::Null) }));
    let client = client_for(router).await;
    assert_eq!(client.list_cases().await, Ok(Vec::new()));
}

#[tokio::test]
async fn list_reports_connectivity_failure() {
    let client = ApiClient::new(ClientConfig::new(dead_origin().await));
    let err = client.list_cases().await.unwrap_err();
    assert!(err.is_network(), "expected a network error, got {err:?}");
}

#[tokio::test]
async fn create_sends_payload_and_returns_case() {
    let recorder = Recorder::default();
    let router = Router::new()
        .route(
            "/api/v1/animals/",
            post(|State(rec): State<Recorder>, Json(body): Json<Value>| async move {
                rec.hits.fetch_add(1, Ordering::SeqCst);
                *rec.last_body.lock().unwrap() = Some(body.clone());
                let mut created = body;
                created["id"] = json!(7);
                created["status"] = json!("open");
                (StatusCode::CREATED, Json(created))
            }),
        )
        .with_state(recorder.clone());
    let client = client_for(router).await;

    let payload = NewCase::new(
        "Injured dog near the park",
        Coordinates::new(4.65, -74.05).unwrap(),
        None,
    )
    .unwrap();
    let created = client.create_case(&payload).await.unwrap();

    assert_eq!(created.id, "7");
    assert_eq!(created.status, CaseStatus::Open);
    assert_eq!(recorder.hits.load(Ordering::SeqCst), 1);
    let sent = recorder.last_body.lock().unwrap().clone().unwrap();
    assert_eq!(
        sent,
        json!({"description": "Injured dog near the park", "latitude": 4.65, "longitude": -74.05})
    );
}

#[tokio::test]
async fn create_propagates_server_payload() {
    let router = Router::new().route(
        "/api/v1/animals/",
        post(|| async {
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({"detail": "description too short"})),
            )
        }),
    );
    let client = client_for(router).await;
    let payload = NewCase::new("x", Coordinates::new(0.0, 0.0).unwrap(), None).unwrap();

    let err = client.create_case(&payload).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Rejected {
            status: 422,
            payload: json!({"detail": "description too short"}),
        }
    );
    assert_eq!(err.message(), "description too short");
}

#[tokio::test]
async fn update_sends_only_present_fields() {
    let recorder = Recorder::default();
    let router = Router::new()
        .route(
            "/api/v1/animals/:id",
            put(
                |State(rec): State<Recorder>, Path(id): Path<String>, Json(body): Json<Value>| async move {
                    *rec.last_body.lock().unwrap() = Some(body);
                    let id: i64 = id.parse().unwrap();
                    Json(case_json(id, "resolved"))
                },
            ),
        )
        .with_state(recorder.clone());
    let client = client_for(router).await;

    let updated = client
        .update_case("5", &CaseUpdate::status(CaseStatus::Resolved))
        .await
        .unwrap();
    assert_eq!(updated.id, "5");
    assert_eq!(updated.status, CaseStatus::Resolved);
    assert_eq!(
        recorder.last_body.lock().unwrap().clone(),
        Some(json!({"status": "resolved"}))
    );
}

#[tokio::test]
async fn invalid_update_never_reaches_the_server() {
    let recorder = Recorder::default();
    let router = Router::new()
        .route(
            "/api/v1/animals/:id",
            put(|State(rec): State<Recorder>| async move {
                rec.hits.fetch_add(1, Ordering::SeqCst);
                StatusCode::OK
            }),
        )
        .with_state(recorder.clone());
    let client = client_for(router).await;

    let update = CaseUpdate {
        longitude: Some(-200.0),
        ..CaseUpdate::default()
    };
    let err = client.update_case("1", &update).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Invalid(ValidationError::LongitudeOutOfRange(-200.0))
    );
    assert_eq!(recorder.hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn invalid_create_never_reaches_the_server() {
    let recorder = Recorder::default();
    let router = Router::new()
        .route(
            "/api/v1/animals/",
            post(|State(rec): State<Recorder>| async move {
                rec.hits.fetch_add(1, Ordering::SeqCst);
                StatusCode::CREATED
            }),
        )
        .with_state(recorder.clone());
    let client = client_for(router).await;

    let out_of_range = NewCase {
        description: "Dog".to_string(),
        latitude: 95.0,
        longitude: -74.0,
        image_url: None,
    };
    let err = client.create_case(&out_of_range).await.unwrap_err();
    assert_eq!(err, ApiError::Invalid(ValidationError::LatitudeOutOfRange(95.0)));

    let blank = NewCase {
        description: "  ".to_string(),
        latitude: 4.6,
        longitude: -200.0,
        image_url: None,
    };
    let err = client.create_case(&blank).await.unwrap_err();
    assert_eq!(err, ApiError::Invalid(ValidationError::EmptyDescription));

    assert_eq!(recorder.hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn delete_succeeds_on_no_content_and_surfaces_404() {
    let router = Router::new().route(
        "/api/v1/animals/:id",
        axum::routing::delete(|Path(id): Path<String>| async move {
            if id == "1" {
                StatusCode::NO_CONTENT.into_response()
            } else {
                (StatusCode::NOT_FOUND, Json(json!({"detail": "Case not found"}))).into_response()
            }
        }),
    );
    let client = client_for(router).await;

    assert_eq!(client.delete_case("1").await, Ok(()));
    let err = client.delete_case("2").await.unwrap_err();
    assert_eq!(err.message(), "Case not found");
}

#[tokio::test]
async fn write_paths_report_connectivity_failure() {
    let client = ApiClient::new(ClientConfig::new(dead_origin().await));
    let err = client.delete_case("1").await.unwrap_err();
    assert!(err.is_network());
}

#[tokio::test]
async fn upload_sends_multipart_file_field() {
    let router = Router::new().route(
        "/api/v1/upload/image",
        post(|mut multipart: Multipart| async move {
            let mut seen = None;
            while let Some(field) = multipart.next_field().await.unwrap() {
                let name = field.name().unwrap_or_default().to_string();
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let bytes = field.bytes().await.unwrap();
                seen = Some((name, file_name, content_type, bytes.len()));
            }
            let (name, file_name, content_type, len) = seen.unwrap();
            assert_eq!(name, "file");
            assert_eq!(file_name, "dog.jpg");
            assert_eq!(content_type, "image/jpeg");
            assert_eq!(len, 4);
            Json(json!({
                "image_url": "/uploads/abc.jpg",
                "latitude": 4.61,
                "longitude": -74.08,
                "has_gps": true
            }))
        }),
    );
    let client = client_for(router).await;

    let uploaded = client
        .upload_image(ImageUpload {
            file_name: "dog.jpg".to_string(),
            content_type: Some("image/jpeg".to_string()),
            bytes: vec![0xFF, 0xD8, 0xFF, 0xE0],
        })
        .await
        .unwrap();
    assert_eq!(uploaded.image_url, "/uploads/abc.jpg");
    let gps = uploaded.gps().unwrap();
    assert_eq!(gps.latitude(), 4.61);
    assert_eq!(
        client.config().image_url(&uploaded.image_url).as_deref(),
        Some(format!("{}/uploads/abc.jpg", client.config().api_origin()).as_str())
    );
}

#[tokio::test]
async fn geocode_uses_first_result_and_passes_key() {
    let router = Router::new().route(
        "/geocode/json",
        get(|Query(params): Query<HashMap<String, String>>| async move {
            assert_eq!(params.get("key").map(String::as_str), Some("test-key"));
            match params.get("address").map(String::as_str) {
                Some("Calle 26 #57-83, Bogota") => Json(json!({
                    "status": "OK",
                    "results": [
                        {"geometry": {"location": {"lat": 4.6486, "lng": -74.0995}}},
                        {"geometry": {"location": {"lat": 0.0, "lng": 0.0}}}
                    ]
                })),
                _ => Json(json!({"status": "ZERO_RESULTS", "results": []})),
            }
        }),
    );
    let origin = serve(router).await;
    let client = ApiClient::new(
        ClientConfig::new(origin.clone())
            .with_maps_key("test-key")
            .with_geocode_endpoint(format!("{origin}/geocode/json")),
    );

    let found = client
        .geocode_address("Calle 26 #57-83, Bogota")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.latitude(), 4.6486);
    assert_eq!(found.longitude(), -74.0995);

    assert_eq!(client.geocode_address("nowhere at all").await, Ok(None));
}

#[tokio::test]
async fn blank_address_is_rejected_locally() {
    let client = ApiClient::new(
        ClientConfig::new(dead_origin().await).with_geocode_endpoint("http://127.0.0.1:9/never"),
    );
    assert_eq!(
        client.geocode_address("   ").await,
        Err(ApiError::Invalid(ValidationError::EmptyAddress))
    );
}
