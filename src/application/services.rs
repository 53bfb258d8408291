use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    application::ports::{AnnotatorPort, DetectionPort, ImageStorePort},
    domain::{
        compliance::{self, ComplianceResult},
        detection::Detection,
        errors::{DomainError, DomainResult},
        upload,
    },
};

/// Contexto de una inspección: todo lo que la respuesta necesita,
/// sin estado de sesión en el servidor.
#[derive(Debug, Clone)]
pub struct InspectionReport {
    pub upload_name: String,
    pub result_name: String,
    pub detections: Vec<Detection>,
    pub compliance: ComplianceResult,
}

/// Caso de uso principal: subir imagen, detectar, anotar y evaluar el EPP.
#[derive(Clone)]
pub struct InspectionService {
    detector: Arc<dyn DetectionPort>,
    store: Arc<dyn ImageStorePort>,
    annotator: Arc<dyn AnnotatorPort>,
}

impl InspectionService {
    pub fn new(
        detector: Arc<dyn DetectionPort>,
        store: Arc<dyn ImageStorePort>,
        annotator: Arc<dyn AnnotatorPort>,
    ) -> Self {
        Self { detector, store, annotator }
    }

    pub async fn inspect(&self, file_name: &str, bytes: &[u8]) -> DomainResult<InspectionReport> {
        let upload_name = upload::accept_upload_name(file_name)?;
        if bytes.is_empty() {
            return Err(DomainError::Validation("uploaded file is empty".into()));
        }

        let source = self.store.save_upload(&upload_name, bytes).await?;
        info!("📥 Upload stored: {} ({} bytes)", source.display(), bytes.len());

        let detections = self.detector.detect(bytes).await.map_err(|e| {
            if let DomainError::DetectionService { status, body } = &e {
                warn!("Detection service failed. Status: {:?} Body: {}", status, body);
            }
            e
        })?;

        let result_name = upload::result_filename(&upload_name);
        let output = self.store.result_path(&result_name);

        // Decodificar, dibujar y codificar PNG es trabajo de CPU: fuera del runtime.
        let annotator = self.annotator.clone();
        let to_draw = detections.clone();
        tokio::task::spawn_blocking(move || annotator.render(&source, &to_draw, &output))
            .await
            .map_err(|e| DomainError::Storage(format!("annotation task failed: {e}")))??;

        let compliance = compliance::evaluate(&detections);
        match &compliance.counts {
            Some(counts) => info!(
                "🔍 {}: {} | findings: {}",
                upload_name,
                compliance::summarize(counts),
                compliance.findings.len()
            ),
            None => info!("🔍 {}: nothing detected", upload_name),
        }

        Ok(InspectionReport { upload_name, result_name, detections, compliance })
    }
}
