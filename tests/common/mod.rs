#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use image::{ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use ppe_dashboard::adapters::{
    http::{router, state::HttpState},
    imaging::annotator::ImageAnnotator,
    storage::fs_store::LocalImageStore,
};
use ppe_dashboard::application::{ports::DetectionPort, services::InspectionService};
use ppe_dashboard::config::Settings;
use ppe_dashboard::domain::{
    detection::Detection,
    errors::{DomainError, DomainResult},
};

pub const BOUNDARY: &str = "ppe-test-boundary";

/// Resultado que devuelve el detector falso en cada llamada.
#[derive(Clone)]
pub enum Outcome {
    Detections(Vec<Detection>),
    Fail { status: Option<u16>, body: String },
}

pub struct FakeDetector {
    outcome: Outcome,
    calls: Mutex<Vec<Vec<u8>>>,
}

impl FakeDetector {
    pub fn new(outcome: Outcome) -> Self {
        Self { outcome, calls: Mutex::new(Vec::new()) }
    }

    pub fn calls(&self) -> Vec<Vec<u8>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DetectionPort for FakeDetector {
    async fn detect(&self, image: &[u8]) -> DomainResult<Vec<Detection>> {
        self.calls.lock().unwrap().push(image.to_vec());
        match &self.outcome {
            Outcome::Detections(d) => Ok(d.clone()),
            Outcome::Fail { status, body } => Err(DomainError::detection(*status, body.clone())),
        }
    }
}

pub fn det(label: &str, cx: f32, cy: f32, w: f32, h: f32) -> Detection {
    Detection {
        class_label: label.to_string(),
        confidence: 0.9,
        center_x: cx,
        center_y: cy,
        width: w,
        height: h,
    }
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([90, 90, 90]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).unwrap();
    buf.into_inner()
}

/// Cuerpo multipart con un único campo de archivo.
pub fn multipart_body(field: &str, file_name: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}

pub struct TestApp {
    pub router: Router,
    pub service: InspectionService,
    pub detector: Arc<FakeDetector>,
    pub dir: TempDir,
}

impl TestApp {
    pub fn new(outcome: Outcome) -> Self {
        Self::with_settings(outcome, Settings::default())
    }

    pub fn with_settings(outcome: Outcome, base: Settings) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            static_dir: dir.path().join("static"),
            upload_dir: dir.path().join("uploads"),
            results_dir: dir.path().join("results"),
            ..base
        };
        for d in [&settings.static_dir, &settings.upload_dir, &settings.results_dir] {
            std::fs::create_dir_all(d).unwrap();
        }
        std::fs::write(
            settings.static_dir.join("index.html"),
            "<html><body><form action=\"/upload\"></form></body></html>",
        )
        .unwrap();

        let detector = Arc::new(FakeDetector::new(outcome));
        let store = Arc::new(LocalImageStore::new(&settings.upload_dir, &settings.results_dir));
        let service = InspectionService::new(detector.clone(), store, Arc::new(ImageAnnotator::new()));

        let state = HttpState {
            inspection: Arc::new(service.clone()),
            settings: Arc::new(settings),
        };

        Self { router: router(state), service, detector, dir }
    }

    pub fn upload_path(&self, name: &str) -> PathBuf {
        self.dir.path().join("uploads").join(name)
    }

    pub fn result_path(&self, name: &str) -> PathBuf {
        self.dir.path().join("results").join(name)
    }
}
