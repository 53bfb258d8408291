use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid upload: {0}")]
    Validation(String),
    #[error("Detection service failed (status {}): {body}", display_status(.status))]
    DetectionService { status: Option<u16>, body: String },
    #[error("Image processing failed: {0}")]
    Image(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn detection(status: Option<u16>, body: impl Into<String>) -> Self {
        Self::DetectionService { status, body: body.into() }
    }
}

fn display_status(status: &Option<u16>) -> String {
    status.map(|s| s.to_string()).unwrap_or_else(|| "none".into())
}

pub type DomainResult<T> = Result<T, DomainError>;
