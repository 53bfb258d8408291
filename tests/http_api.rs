//! End-to-end tests of the HTTP surface, driven through the axum router with
//! a fake detector and real storage/annotation on a temp directory.

mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
};
use tower::util::ServiceExt; // for `oneshot`

use common::{det, multipart_body, multipart_content_type, png_bytes, Outcome, TestApp};
use ppe_dashboard::application::dto::InspectionResponse;
use ppe_dashboard::config::Settings;
use ppe_dashboard::domain::compliance::{PpeFinding, NO_DETECTIONS_MESSAGE};

fn upload_request(uri: &str, field: &str, file_name: &str, bytes: &[u8]) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, multipart_content_type())
        .body(Body::from(multipart_body(field, file_name, bytes)))
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn worker_without_vest() -> Outcome {
    Outcome::Detections(vec![det("Person", 20.0, 20.0, 10.0, 20.0), det("no-vest", 20.0, 24.0, 8.0, 8.0)])
}

#[tokio::test]
async fn upload_form_renders_result_page() {
    let app = TestApp::new(worker_without_vest());
    let response = app
        .router
        .clone()
        .oneshot(upload_request("/upload", "file", "site.jpg", &png_bytes(40, 40)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("<li>Missing safety vest.</li>"));
    assert!(html.contains("src=\"/results/site.png\""));
    assert!(app.upload_path("site.jpg").exists());
    assert!(app.result_path("site.png").exists());

    // la imagen anotada se sirve desde /results
    let image = app
        .router
        .clone()
        .oneshot(Request::get("/results/site.png").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(image.status(), StatusCode::OK);
    assert_eq!(image.headers()[header::CONTENT_TYPE], "image/png");
}

#[tokio::test]
async fn upload_form_redirects_on_disallowed_extension() {
    let app = TestApp::new(worker_without_vest());
    let response = app
        .router
        .clone()
        .oneshot(upload_request("/upload", "file", "notes.txt", b"hello"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");
    assert!(app.detector.calls().is_empty());
}

#[tokio::test]
async fn upload_form_redirects_without_file_field() {
    let app = TestApp::new(worker_without_vest());
    let response = app
        .router
        .clone()
        .oneshot(upload_request("/upload", "picture", "site.png", &png_bytes(4, 4)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(app.detector.calls().is_empty());
}

#[tokio::test]
async fn upload_form_surfaces_detection_failures() {
    let app = TestApp::new(Outcome::Fail { status: Some(500), body: "<html>boom</html>".into() });
    let response = app
        .router
        .clone()
        .oneshot(upload_request("/upload", "file", "site.png", &png_bytes(8, 8)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let html = body_text(response).await;
    assert!(html.contains("Detection unavailable"));
    assert!(!html.contains("boom"));
    assert_eq!(app.detector.calls().len(), 1);
    assert!(!app.result_path("site.png").exists());
}

#[tokio::test]
async fn get_upload_redirects_home() {
    let app = TestApp::new(worker_without_vest());
    let response = app
        .router
        .clone()
        .oneshot(Request::get("/upload").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn api_inspect_returns_compliance_json() {
    let app = TestApp::new(Outcome::Detections(vec![
        det("Person", 10.0, 10.0, 6.0, 6.0),
        det("Person", 30.0, 10.0, 6.0, 6.0),
        det("helmet", 10.0, 8.0, 4.0, 2.0),
    ]));
    let response = app
        .router
        .clone()
        .oneshot(upload_request("/api/inspect", "file", "crew photo.JPEG", &png_bytes(40, 20)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let res: InspectionResponse = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(res.filename, "crew_photo.png");
    assert_eq!(res.result_url, "/results/crew_photo.png");
    assert_eq!(res.summary, "2 Person, 1 helmet");
    assert_eq!(res.findings, vec![PpeFinding::WorkersMissingPpe]);
    assert_eq!(res.counts.unwrap()["Person"], 2);
    assert_eq!(res.detections.len(), 3);
    assert!(app.result_path("crew_photo.png").exists());
}

#[tokio::test]
async fn api_inspect_with_no_detections_still_writes_output() {
    let app = TestApp::new(Outcome::Detections(vec![]));
    let source = png_bytes(12, 12);
    let response = app
        .router
        .clone()
        .oneshot(upload_request("/api/inspect", "file", "empty.png", &source))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let res: InspectionResponse = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(res.message, NO_DETECTIONS_MESSAGE);
    assert!(res.counts.is_none());

    let written = image::open(app.result_path("empty.png")).unwrap().to_rgba8();
    let original = image::load_from_memory(&source).unwrap().to_rgba8();
    assert_eq!(written, original);
}

#[tokio::test]
async fn api_inspect_rejects_bad_extension_with_400() {
    let app = TestApp::new(worker_without_vest());
    let response = app
        .router
        .clone()
        .oneshot(upload_request("/api/inspect", "file", "payload.exe", b"MZ"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert!(body["error"].as_str().unwrap().contains("not allowed"));
}

#[tokio::test]
async fn api_inspect_rejects_undecodable_image_with_422() {
    let app = TestApp::new(worker_without_vest());
    let response = app
        .router
        .clone()
        .oneshot(upload_request("/api/inspect", "file", "broken.png", b"definitely not a png"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn api_inspect_maps_detection_failure_to_502() {
    let app = TestApp::new(Outcome::Fail { status: None, body: "connection refused".into() });
    let response = app
        .router
        .clone()
        .oneshot(upload_request("/api/inspect", "file", "site.gif", &png_bytes(4, 4)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert!(body["error"].as_str().unwrap().contains("unreachable"));
}

#[tokio::test]
async fn config_endpoint_never_exposes_the_api_key() {
    let base = Settings { roboflow_api_key: Some("super-secret-key".into()), ..Settings::default() };
    let app = TestApp::with_settings(Outcome::Detections(vec![]), base);
    let response = app
        .router
        .clone()
        .oneshot(Request::get("/api/config").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let text = body_text(response).await;
    assert!(!text.contains("super-secret-key"));
    let body: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(body["api_key_configured"], true);
    assert_eq!(body["output_format"], "png");
    assert_eq!(body["allowed_extensions"].as_array().unwrap().len(), 4);
    assert_eq!(body["label_colors"][0]["label"], "Person");
    assert_eq!(body["fallback_color"], "#ffffff");
}

#[tokio::test]
async fn landing_page_is_served_from_static_dir() {
    let app = TestApp::new(Outcome::Detections(vec![]));
    let response = app
        .router
        .clone()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("<form action=\"/upload\">"));
}

#[tokio::test]
async fn oversized_upload_is_rejected() {
    let base = Settings { max_upload_bytes: 1024, ..Settings::default() };
    let app = TestApp::with_settings(Outcome::Detections(vec![]), base);
    let response = app
        .router
        .clone()
        .oneshot(upload_request("/api/inspect", "file", "big.png", &vec![0u8; 4096]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(app.detector.calls().is_empty());
}

#[tokio::test]
async fn oversized_form_upload_gets_an_html_error_page() {
    let base = Settings { max_upload_bytes: 1024, ..Settings::default() };
    let app = TestApp::with_settings(Outcome::Detections(vec![]), base);
    let response = app
        .router
        .clone()
        .oneshot(upload_request("/upload", "file", "big.png", &vec![0u8; 4096]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));
    assert!(body_text(response).await.contains("Upload failed"));
    assert!(app.detector.calls().is_empty());
}

#[tokio::test]
async fn unwritable_results_dir_is_a_server_error() {
    let app = TestApp::new(worker_without_vest());
    std::fs::remove_dir_all(app.dir.path().join("results")).unwrap();

    let response = app
        .router
        .clone()
        .oneshot(upload_request("/api/inspect", "file", "site.png", &png_bytes(8, 8)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert!(body["error"].as_str().unwrap().contains("could not be stored"));
    assert!(app.upload_path("site.png").exists());
}
