pub mod error;
pub mod pages;
pub mod routes;
pub mod state;

use axum::{extract::DefaultBodyLimit, routing::{get, post}, Router};
use tower_http::{services::ServeDir, trace::TraceLayer};
use crate::adapters::http::state::HttpState;
use crate::application::dto::{RESULTS_ROUTE, UPLOADS_ROUTE};

pub fn router(state: HttpState) -> Router {
    let settings = state.settings.clone();

    Router::new()
        .route("/upload", post(routes::upload_form).get(routes::upload_redirect))
        .route("/api/inspect", post(routes::inspect_api))
        .route("/api/config", get(routes::get_config))
        .nest_service(UPLOADS_ROUTE, ServeDir::new(&settings.upload_dir))
        .nest_service(RESULTS_ROUTE, ServeDir::new(&settings.results_dir))
        // index.html, about.html, team.html, results.html, demo.html
        .fallback_service(ServeDir::new(&settings.static_dir))
        .layer(DefaultBodyLimit::max(settings.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
