use async_trait::async_trait;
use base64::{prelude::BASE64_STANDARD, Engine};
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use crate::application::ports::DetectionPort;
use crate::domain::{
    detection::Detection,
    errors::{DomainError, DomainResult},
};

pub const DEFAULT_DETECT_URL: &str = "https://detect.roboflow.com/ppe-detection-using-cv/3";

#[derive(Deserialize)]
struct PredictionEnvelope {
    #[serde(default)]
    predictions: Option<Vec<Prediction>>,
}

#[derive(Deserialize)]
struct Prediction {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    class: String,
    confidence: f32,
}

impl From<Prediction> for Detection {
    fn from(p: Prediction) -> Self {
        Detection {
            class_label: p.class,
            confidence: p.confidence,
            center_x: p.x,
            center_y: p.y,
            width: p.width,
            height: p.height,
        }
    }
}

/// Cliente del endpoint de detección alojado (formato Roboflow).
pub struct RoboflowClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl RoboflowClient {
    pub fn new(
        endpoint: &str,
        api_key: Option<String>,
        timeout: Option<Duration>,
    ) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        info!(
            "Detection client configured: endpoint={}, api_key={}",
            endpoint,
            if api_key.is_some() { "set" } else { "missing" }
        );

        Ok(Self { client, endpoint: endpoint.to_string(), api_key })
    }
}

#[async_trait]
impl DetectionPort for RoboflowClient {
    async fn detect(&self, image: &[u8]) -> DomainResult<Vec<Detection>> {
        let encoded = BASE64_STANDARD.encode(image);

        let mut req = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(encoded);
        if let Some(key) = &self.api_key {
            req = req.query(&[("api_key", key)]);
        }

        let res = req
            .send()
            .await
            .map_err(|e| DomainError::detection(None, e.to_string()))?;
        let status = res.status().as_u16();
        let body = res
            .text()
            .await
            .map_err(|e| DomainError::detection(Some(status), e.to_string()))?;

        debug!("Detection response: status={} bytes={}", status, body.len());
        parse_predictions(status, &body)
    }
}

/// Interpreta la respuesta del servicio. Una lista vacía o ausente es un
/// resultado válido; un estado no-2xx o un cuerpo que no es JSON es un error.
pub fn parse_predictions(status: u16, body: &str) -> DomainResult<Vec<Detection>> {
    if !(200..300).contains(&status) {
        return Err(DomainError::detection(Some(status), body));
    }
    let envelope: PredictionEnvelope = serde_json::from_str(body)
        .map_err(|_| DomainError::detection(Some(status), body))?;

    Ok(envelope
        .predictions
        .unwrap_or_default()
        .into_iter()
        .map(Detection::from)
        .collect())
}
