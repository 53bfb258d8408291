use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::domain::{
    detection::{Detection, DetectionSet},
    errors::DomainResult,
};

/// Servicio de detección de objetos (remoto).
#[async_trait]
pub trait DetectionPort: Send + Sync {
    async fn detect(&self, image: &[u8]) -> DomainResult<DetectionSet>;
}

#[async_trait]
pub trait ImageStorePort: Send + Sync {
    async fn save_upload(&self, name: &str, bytes: &[u8]) -> DomainResult<PathBuf>;
    fn result_path(&self, name: &str) -> PathBuf;
}

/// Dibuja las detecciones sobre la imagen de origen y escribe el resultado.
/// Es síncrono: el servicio lo ejecuta en un hilo bloqueante.
pub trait AnnotatorPort: Send + Sync {
    fn render(&self, source: &Path, detections: &[Detection], output: &Path) -> DomainResult<()>;
}
