use serde::{Deserialize, Serialize};

use crate::application::services::InspectionReport;
use crate::domain::{
    compliance::{self, ClassCounts, PpeFinding},
    detection::Detection,
};

pub const UPLOADS_ROUTE: &str = "/uploads";
pub const RESULTS_ROUTE: &str = "/results";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectionResponse {
    pub filename: String,
    pub upload_url: String,
    pub result_url: String,
    pub counts: Option<ClassCounts>,
    pub summary: String,
    pub findings: Vec<PpeFinding>,
    pub message: String,
    /// Hubo detecciones y ninguna regla de EPP saltó.
    pub compliant: bool,
    pub detections: Vec<Detection>,
}

impl From<InspectionReport> for InspectionResponse {
    fn from(r: InspectionReport) -> Self {
        let summary = r.compliance.counts.as_ref().map(compliance::summarize).unwrap_or_default();
        let compliant = r.compliance.is_compliant();
        Self {
            upload_url: format!("{}/{}", UPLOADS_ROUTE, r.upload_name),
            result_url: format!("{}/{}", RESULTS_ROUTE, r.result_name),
            filename: r.result_name,
            counts: r.compliance.counts,
            summary,
            findings: r.compliance.findings,
            message: r.compliance.message,
            compliant,
            detections: r.detections,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelColor {
    pub label: String,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigResponse {
    pub allowed_extensions: Vec<String>,
    pub output_format: String,
    pub max_upload_bytes: usize,
    pub detect_url: String,
    pub api_key_configured: bool,
    pub label_colors: Vec<LabelColor>,
    pub fallback_color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
