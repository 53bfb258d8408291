use async_trait::async_trait;
use std::path::PathBuf;
use tracing::info;

use crate::application::ports::ImageStorePort;
use crate::domain::errors::{DomainError, DomainResult};

/// Almacén en disco: un directorio para subidas y otro para resultados.
pub struct LocalImageStore {
    upload_dir: PathBuf,
    results_dir: PathBuf,
}

impl LocalImageStore {
    pub fn new(upload_dir: impl Into<PathBuf>, results_dir: impl Into<PathBuf>) -> Self {
        Self { upload_dir: upload_dir.into(), results_dir: results_dir.into() }
    }

    /// Crea ambos directorios si no existen.
    pub async fn ensure_dirs(&self) -> DomainResult<()> {
        for dir in [&self.upload_dir, &self.results_dir] {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| DomainError::Storage(format!("{}: {}", dir.display(), e)))?;
        }
        info!(
            "📂 Uploads in {}, results in {}",
            self.upload_dir.display(),
            self.results_dir.display()
        );
        Ok(())
    }
}

#[async_trait]
impl ImageStorePort for LocalImageStore {
    async fn save_upload(&self, name: &str, bytes: &[u8]) -> DomainResult<PathBuf> {
        let path = self.upload_dir.join(name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| DomainError::Storage(format!("{}: {}", path.display(), e)))?;
        Ok(path)
    }

    fn result_path(&self, name: &str) -> PathBuf {
        self.results_dir.join(name)
    }
}
