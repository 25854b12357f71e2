//! Upload and lookup integration tests.
//!
//! Run with: `cargo test -p vidproxy-api --test videos_test`

mod helpers;

use axum::http::Method;
use bytes::Bytes;
use helpers::{setup_test_app, setup_test_app_with, video_form, TEST_ORIGIN};
use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};
use vidproxy_core::models::{UploadVideoResponse, VideoLinkResponse};
use vidproxy_storage::keys::url_encode_key;
use vidproxy_storage::Storage;

fn expires_param(url: &str) -> u64 {
    url.split_once("?expires=")
        .and_then(|(_, v)| v.parse().ok())
        .expect("signed url carries an expiry")
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

#[tokio::test]
async fn test_upload_returns_key_url_and_title() {
    let app = setup_test_app().await;

    let before = unix_now();
    let response = app
        .client()
        .post("/upload")
        .multipart(video_form("holiday.mp4", b"frames", Some("Holiday")))
        .await;
    let after = unix_now();

    assert_eq!(response.status_code(), 200);
    let body: UploadVideoResponse = response.json();
    assert!(body.video_key.starts_with("videos/"));
    assert!(body.video_key.ends_with("_holiday.mp4"));
    assert_eq!(body.title, "Holiday");

    let expires = expires_param(&body.video_url);
    assert!(expires >= before + 3600);
    assert!(expires <= after + 3600);
}

#[tokio::test]
async fn test_upload_response_uses_pascal_case_fields() {
    let app = setup_test_app().await;
    let response = app
        .client()
        .post("/upload")
        .multipart(video_form("clip.mp4", b"frames", Some("Clip")))
        .await;

    let json: serde_json::Value = response.json();
    assert!(json.get("VideoKey").is_some());
    assert!(json.get("VideoUrl").is_some());
    assert_eq!(json["Title"], "Clip");
}

#[tokio::test]
async fn test_same_file_twice_gets_distinct_keys() {
    let app = setup_test_app().await;

    let first: UploadVideoResponse = app
        .client()
        .post("/upload")
        .multipart(video_form("clip.mp4", b"one", None))
        .await
        .json();
    let second: UploadVideoResponse = app
        .client()
        .post("/upload")
        .multipart(video_form("clip.mp4", b"two", None))
        .await
        .json();

    assert_ne!(first.video_key, second.video_key);
    assert_eq!(app.storage.object_count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_upload_then_lookup_round_trip() {
    let app = setup_test_app().await;
    let uploaded: UploadVideoResponse = app
        .client()
        .post("/upload")
        .multipart(video_form("trip.mp4", b"the actual bytes", Some("Road trip")))
        .await
        .json();

    let before = unix_now();
    let response = app
        .client()
        .get(&format!("/videos/{}", uploaded.video_key))
        .await;
    assert_eq!(response.status_code(), 200);
    let link: VideoLinkResponse = response.json();
    let after = unix_now();

    assert_eq!(link.title, "Road trip");
    let expires = expires_param(&link.video_url);
    assert!(expires >= before + 15 * 60);
    assert!(expires <= after + 15 * 60);

    let payload = app.storage.fetch_signed_url(&link.video_url).await.unwrap();
    assert_eq!(payload, Bytes::from_static(b"the actual bytes"));
}

#[tokio::test]
async fn test_empty_title_is_returned_as_empty() {
    let app = setup_test_app().await;
    let uploaded: UploadVideoResponse = app
        .client()
        .post("/upload")
        .multipart(video_form("clip.mp4", b"frames", Some("")))
        .await
        .json();
    assert_eq!(uploaded.title, "");

    let link: VideoLinkResponse = app
        .client()
        .get(&format!("/videos/{}", uploaded.video_key))
        .await
        .json();
    assert_eq!(link.title, "");
}

#[tokio::test]
async fn test_absent_title_field_is_stored_as_empty() {
    let app = setup_test_app().await;
    let uploaded: UploadVideoResponse = app
        .client()
        .post("/upload")
        .multipart(video_form("clip.mp4", b"frames", None))
        .await
        .json();

    let link: VideoLinkResponse = app
        .client()
        .get(&format!("/videos/{}", uploaded.video_key))
        .await
        .json();
    assert_eq!(link.title, "");
}

#[tokio::test]
async fn test_object_without_title_metadata_is_untitled() {
    let app = setup_test_app().await;
    app.storage
        .upload_with_key(
            "videos/legacy_clip.mp4",
            Bytes::from_static(b"frames"),
            "video/mp4",
            &HashMap::new(),
        )
        .await
        .unwrap();

    let link: VideoLinkResponse = app
        .client()
        .get("/videos/videos/legacy_clip.mp4")
        .await
        .json();
    assert_eq!(link.title, "(Untitled)");
}

#[tokio::test]
async fn test_lookup_missing_key_is_not_found() {
    let app = setup_test_app().await;
    let response = app
        .client()
        .get("/videos/videos/does-not-exist.mp4")
        .expect_failure()
        .await;

    assert_eq!(response.status_code(), 404);
    let json: serde_json::Value = response.json();
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_empty_file_is_rejected_without_write() {
    let app = setup_test_app().await;
    let response = app
        .client()
        .post("/upload")
        .multipart(video_form("clip.mp4", b"", Some("Empty")))
        .expect_failure()
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.text(), "No file uploaded.");
    assert_eq!(app.storage.object_count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_non_form_content_type_is_rejected() {
    let app = setup_test_app().await;
    let response = app
        .client()
        .post("/upload")
        .json(&serde_json::json!({ "title": "nope" }))
        .expect_failure()
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.text(), "Expected form content.");
    assert_eq!(app.storage.object_count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_urlencoded_form_has_no_file() {
    let app = setup_test_app().await;
    let response = app
        .client()
        .post("/upload")
        .content_type("application/x-www-form-urlencoded")
        .bytes(Bytes::from_static(b"title=hello"))
        .expect_failure()
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.text(), "No file uploaded.");
}

#[tokio::test]
async fn test_form_without_file_part_is_rejected() {
    let app = setup_test_app().await;
    let form = axum_test::multipart::MultipartForm::new().add_text("title", "only a title");
    let response = app
        .client()
        .post("/upload")
        .multipart(form)
        .expect_failure()
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.text(), "No file uploaded.");
}

#[tokio::test]
async fn test_oversized_upload_is_rejected() {
    let app = setup_test_app_with(&[("MAX_VIDEO_SIZE_MB", "1")]).await;
    let big = vec![7u8; 2 * 1024 * 1024];
    let response = app
        .client()
        .post("/upload")
        .multipart(video_form("big.mp4", &big, None))
        .expect_failure()
        .await;

    assert_eq!(response.status_code(), 413);
    assert_eq!(app.storage.object_count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_cors_allows_configured_origin() {
    let app = setup_test_app().await;
    let response = app
        .client()
        .get("/health")
        .add_header("Origin", TEST_ORIGIN)
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some(TEST_ORIGIN)
    );
}

#[tokio::test]
async fn test_cors_never_echoes_other_origins() {
    let app = setup_test_app().await;
    let response = app
        .client()
        .get("/health")
        .add_header("Origin", "https://elsewhere.example")
        .await;

    let allowed = response
        .headers()
        .get("access-control-allow-origin")
        .and_then(|v| v.to_str().ok());
    assert_ne!(allowed, Some("https://elsewhere.example"));
    assert_ne!(allowed, Some("*"));
}

#[tokio::test]
async fn test_health_and_unknown_route() {
    let app = setup_test_app().await;

    let health = app.client().get("/health").await;
    assert_eq!(health.status_code(), 200);
    let json: serde_json::Value = health.json();
    assert_eq!(json["status"], "alive");

    let missing = app.client().get("/nope").expect_failure().await;
    assert_eq!(missing.status_code(), 404);
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = setup_test_app().await;
    let response = app.client().get("/api/openapi.json").await;
    assert_eq!(response.status_code(), 200);
    let json: serde_json::Value = response.json();
    assert!(json["paths"].get("/upload").is_some());
}

#[tokio::test]
async fn test_unusual_file_name_is_stored_under_returned_key() {
    let app = setup_test_app().await;
    let uploaded: UploadVideoResponse = app
        .client()
        .post("/upload")
        .multipart(video_form("clip [1080p] été~v2.mp4", b"frames", Some("Odd name")))
        .await
        .json();

    assert!(uploaded.video_key.starts_with("videos/"));
    assert!(uploaded.video_key.ends_with("_clip [1080p] été~v2.mp4"));
    assert_eq!(app.storage.keys().await.unwrap(), vec![uploaded.video_key.clone()]);
    assert_eq!(
        app.storage.fetch_signed_url(&uploaded.video_url).await.unwrap(),
        Bytes::from_static(b"frames")
    );

    let link: VideoLinkResponse = app
        .client()
        .get(&format!("/videos/{}", url_encode_key(&uploaded.video_key)))
        .await
        .json();
    assert_eq!(link.title, "Odd name");
}

#[tokio::test]
async fn test_error_details_shown_outside_production() {
    let app = setup_test_app_with(&[("ENVIRONMENT", "development")]).await;
    let response = app
        .client()
        .get("/videos/videos/missing.mp4")
        .expect_failure()
        .await;

    assert_eq!(response.status_code(), 404);
    let json: serde_json::Value = response.json();
    assert_eq!(json["error_type"], "NotFound");
    assert!(json["details"].as_str().is_some());
}

#[tokio::test]
async fn test_error_details_hidden_in_production() {
    let app = setup_test_app_with(&[("ENVIRONMENT", "production")]).await;
    let response = app
        .client()
        .get("/videos/videos/missing.mp4")
        .expect_failure()
        .await;

    assert_eq!(response.status_code(), 404);
    let json: serde_json::Value = response.json();
    assert_eq!(json["code"], "NOT_FOUND");
    assert!(json.get("details").is_none());
    assert!(json.get("error_type").is_none());
}

#[tokio::test]
async fn test_cors_preflight_allows_any_method_and_header() {
    let app = setup_test_app().await;
    let response = app
        .client()
        .method(Method::OPTIONS, "/upload")
        .add_header("Origin", TEST_ORIGIN)
        .add_header("Access-Control-Request-Method", "PATCH")
        .add_header("Access-Control-Request-Headers", "x-custom-header, content-type")
        .await;

    assert_eq!(response.status_code(), 200);
    let header = |name: &str| {
        response
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    assert_eq!(header("access-control-allow-origin").as_deref(), Some(TEST_ORIGIN));
    assert_eq!(header("access-control-allow-methods").as_deref(), Some("*"));
    assert_eq!(header("access-control-allow-headers").as_deref(), Some("*"));
}
