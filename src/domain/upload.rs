use super::errors::{DomainError, DomainResult};

pub const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

/// Extensión de las imágenes anotadas.
pub const OUTPUT_EXTENSION: &str = "png";

pub fn allowed_file(name: &str) -> bool {
    name.rsplit_once('.')
        .map(|(_, ext)| ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Reduce un nombre de archivo del cliente a algo seguro para el disco y para URLs.
pub fn sanitize_filename(raw: &str) -> String {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .filter_map(|c| {
            if c.is_whitespace() {
                Some('_')
            } else if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                Some(c)
            } else {
                None
            }
        })
        .collect();
    cleaned.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// Valida y sanea el nombre recibido en el formulario.
pub fn accept_upload_name(raw: &str) -> DomainResult<String> {
    if raw.trim().is_empty() {
        return Err(DomainError::Validation("no file selected".into()));
    }
    if !allowed_file(raw) {
        return Err(DomainError::Validation(format!(
            "file type not allowed: {raw} (allowed: {})",
            ALLOWED_EXTENSIONS.join(", ")
        )));
    }
    let name = sanitize_filename(raw);
    if !allowed_file(&name) {
        return Err(DomainError::Validation(format!("unusable file name: {raw}")));
    }
    Ok(name)
}

/// Nombre del archivo anotado: misma base, extensión de salida.
pub fn result_filename(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((stem, _)) => format!("{stem}.{OUTPUT_EXTENSION}"),
        None => format!("{name}.{OUTPUT_EXTENSION}"),
    }
}
