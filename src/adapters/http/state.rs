use std::sync::Arc;
use crate::application::services::InspectionService;
use crate::config::Settings;

/// Estado compartido para los manejadores HTTP de Axum.
/// Solo contiene el caso de uso y la configuración; nada mutable entre peticiones.
#[derive(Clone)]
pub struct HttpState {
    /// Servicio de inspección de EPP (subida + detección + anotación).
    pub inspection: Arc<InspectionService>,
    pub settings: Arc<Settings>,
}
