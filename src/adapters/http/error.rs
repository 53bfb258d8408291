use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use axum_extra::extract::multipart::MultipartError;

use crate::application::dto::ErrorResponse;
use crate::domain::errors::DomainError;

/// Código HTTP de cada error de dominio.
pub fn status_for(err: &DomainError) -> StatusCode {
    match err {
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Image(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DomainError::DetectionService { .. } => StatusCode::BAD_GATEWAY,
        DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Texto mostrado al usuario. El cuerpo de la respuesta remota queda en los logs.
pub fn public_message(err: &DomainError) -> String {
    match err {
        DomainError::DetectionService { status: Some(s), .. } => {
            format!(
                "The detection service could not process the image (HTTP {s}). \
                 Please try again later."
            )
        }
        DomainError::DetectionService { status: None, .. } => {
            "The detection service is unreachable. Please try again later.".to_string()
        }
        DomainError::Storage(_) => {
            "The image could not be stored. Please try again later.".to_string()
        }
        other => other.to_string(),
    }
}

pub enum ApiError {
    Domain(DomainError),
    Multipart(MultipartError),
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        ApiError::Domain(e)
    }
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        ApiError::Multipart(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Domain(e) => {
                (status_for(&e), Json(ErrorResponse { error: public_message(&e) })).into_response()
            }
            ApiError::Multipart(e) => {
                (e.status(), Json(ErrorResponse { error: e.body_text() })).into_response()
            }
        }
    }
}
