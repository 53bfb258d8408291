use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::Multipart;
use tracing::{info, warn};

use crate::adapters::http::error::{public_message, status_for, ApiError};
use crate::adapters::http::pages;
use crate::adapters::http::state::HttpState;
use crate::application::dto::{ConfigResponse, InspectionResponse, LabelColor};
use crate::domain::{
    errors::{DomainError, DomainResult},
    palette,
    upload::{ALLOWED_EXTENSIONS, OUTPUT_EXTENSION},
};

/// Nombre del campo del formulario con la imagen.
pub const FILE_FIELD: &str = "file";

struct UploadedFile {
    file_name: String,
    bytes: Vec<u8>,
}

/// Busca el campo `file` en el formulario multipart.
async fn read_upload(multipart: &mut Multipart) -> Result<DomainResult<UploadedFile>, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?.to_vec();
        return Ok(Ok(UploadedFile { file_name, bytes }));
    }
    Ok(Err(DomainError::Validation("no file part in the request".into())))
}

async fn run_inspection(
    st: &HttpState,
    multipart: &mut Multipart,
) -> Result<DomainResult<InspectionResponse>, ApiError> {
    let upload = match read_upload(multipart).await? {
        Ok(upload) => upload,
        Err(e) => return Ok(Err(e)),
    };
    info!("Upload received: {} ({} bytes)", upload.file_name, upload.bytes.len());

    let report = st.inspection.inspect(&upload.file_name, &upload.bytes).await;
    Ok(report.map(InspectionResponse::from))
}

/// POST /upload — flujo de formulario HTML.
///
/// Errores de validación vuelven a la portada; el resto se muestra en una página de error.
pub async fn upload_form(State(st): State<HttpState>, mut multipart: Multipart) -> Response {
    let outcome = match run_inspection(&st, &mut multipart).await {
        Ok(outcome) => outcome,
        Err(ApiError::Domain(e)) => Err(e),
        Err(ApiError::Multipart(e)) => {
            warn!("Multipart error: {}", e.body_text());
            let page = pages::render_error("Upload failed", &e.body_text());
            return (e.status(), Html(page)).into_response();
        }
    };

    match outcome {
        Ok(res) => Html(pages::render_result(&res)).into_response(),
        Err(DomainError::Validation(reason)) => {
            warn!("Upload rejected: {}", reason);
            Redirect::to("/").into_response()
        }
        Err(e) => {
            let title = match &e {
                DomainError::DetectionService { .. } => "Detection unavailable",
                DomainError::Image(_) => "Unreadable image",
                _ => "Upload failed",
            };
            (status_for(&e), Html(pages::render_error(title, &public_message(&e)))).into_response()
        }
    }
}

/// GET /upload — no hay nada que mostrar sin una subida.
pub async fn upload_redirect() -> Redirect {
    Redirect::to("/")
}

/// POST /api/inspect — mismo caso de uso, respuesta JSON.
pub async fn inspect_api(
    State(st): State<HttpState>,
    mut multipart: Multipart,
) -> Result<Json<InspectionResponse>, ApiError> {
    let res = run_inspection(&st, &mut multipart).await??;
    Ok(Json(res))
}

pub async fn get_config(State(st): State<HttpState>) -> impl IntoResponse {
    let s = &st.settings;
    Json(ConfigResponse {
        allowed_extensions: ALLOWED_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        output_format: OUTPUT_EXTENSION.to_string(),
        max_upload_bytes: s.max_upload_bytes,
        detect_url: s.detect_url.clone(),
        api_key_configured: s.roboflow_api_key.is_some(),
        label_colors: palette::LABEL_COLORS
            .iter()
            .map(|(label, color)| LabelColor {
                label: label.to_string(),
                color: palette::to_hex(*color),
            })
            .collect(),
        fallback_color: palette::to_hex(palette::FALLBACK_COLOR),
    })
}
