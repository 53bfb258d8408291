use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::adapters::roboflow::client::DEFAULT_DETECT_URL;

/// Configuración leída del entorno (y de `.env` si existe).
///
/// | Variable              | Por defecto                |
/// |-----------------------|----------------------------|
/// | `PORT`                | 3111                       |
/// | `ROBOFLOW_API_KEY`    | sin clave                  |
/// | `DETECT_URL`          | endpoint público de EPP    |
/// | `DETECT_TIMEOUT_SECS` | sin timeout                |
/// | `STATIC_DIR`          | `static`                   |
/// | `UPLOAD_DIR`          | `static/uploads`           |
/// | `RESULTS_DIR`         | `static/results`           |
/// | `MAX_UPLOAD_BYTES`    | 10 MiB                     |
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub roboflow_api_key: Option<String>,
    #[serde(default = "default_detect_url")]
    pub detect_url: String,
    #[serde(default)]
    pub detect_timeout_secs: Option<u64>,
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_port() -> u16 { 3111 }
fn default_detect_url() -> String { DEFAULT_DETECT_URL.to_string() }
fn default_static_dir() -> PathBuf { PathBuf::from("static") }
fn default_upload_dir() -> PathBuf { PathBuf::from("static/uploads") }
fn default_results_dir() -> PathBuf { PathBuf::from("static/results") }
fn default_max_upload_bytes() -> usize { 10 * 1024 * 1024 }

impl Settings {
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenv::dotenv().ok();
        let mut settings: Settings = envy::from_env()?;
        settings.normalize();
        Ok(settings)
    }

    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut settings: Settings = envy::from_iter(vars)?;
        settings.normalize();
        Ok(settings)
    }

    // Una clave vacía en .env equivale a no tener clave.
    fn normalize(&mut self) {
        if self.roboflow_api_key.as_deref().is_some_and(|k| k.trim().is_empty()) {
            self.roboflow_api_key = None;
        }
    }

    pub fn detect_timeout(&self) -> Option<Duration> {
        self.detect_timeout_secs.map(Duration::from_secs)
    }

    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: default_port(),
            roboflow_api_key: None,
            detect_url: default_detect_url(),
            detect_timeout_secs: None,
            static_dir: default_static_dir(),
            upload_dir: default_upload_dir(),
            results_dir: default_results_dir(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}
