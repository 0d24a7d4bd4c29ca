pub mod diagnostics;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::{ServeDir, ServeFile};
use tracing::info;

use crate::proposals::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/api/health", get(health::health_handler))
        .route(
            "/api/generate-proposals",
            post(handlers::handle_generate_proposals),
        );

    if state.config.expose_env_diagnostics {
        router = router.route(
            "/api/test-env",
            get(diagnostics::env_diagnostics_handler),
        );
    }

    let static_dir = state.config.static_dir.clone();
    let router = router.with_state(state);

    // Single-page app: unknown paths fall through to index.html
    if static_dir.is_dir() {
        info!("Serving static files from {}", static_dir.display());
        let index = static_dir.join("index.html");
        router.fallback_service(ServeDir::new(&static_dir).fallback(ServeFile::new(index)))
    } else {
        router
    }
}
