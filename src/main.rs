use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use ppe_dashboard::adapters::{
    http::{router, state::HttpState},
    imaging::annotator::ImageAnnotator,
    roboflow::client::RoboflowClient,
    storage::fs_store::LocalImageStore,
};
use ppe_dashboard::application::services::InspectionService;
use ppe_dashboard::config::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Logs (RUST_LOG=info por defecto)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // 2. Configuración desde el entorno
    let settings = Settings::from_env()?;
    if settings.roboflow_api_key.is_none() {
        tracing::warn!(
            "⚠️ ROBOFLOW_API_KEY not set; the detection service will likely reject requests"
        );
    }

    tracing::info!("🔧 Initializing adapters...");

    // 3. Adaptadores de infraestructura
    let store = Arc::new(LocalImageStore::new(&settings.upload_dir, &settings.results_dir));
    store.ensure_dirs().await?;
    let detector = Arc::new(RoboflowClient::new(
        &settings.detect_url,
        settings.roboflow_api_key.clone(),
        settings.detect_timeout(),
    )?);
    let annotator = Arc::new(ImageAnnotator::new());

    // 4. Caso de uso
    let inspection = Arc::new(InspectionService::new(detector, store, annotator));

    // 5. Estado y router
    let addr = settings.listen_addr();
    let state = HttpState { inspection, settings: Arc::new(settings) };
    let app = router(state);

    // 6. Servidor
    tracing::info!("🚀 PPE dashboard listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
