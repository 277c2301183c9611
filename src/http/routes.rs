use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::path::Path;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
///
/// `library_root` is served statically under `/media` so saved files are
/// directly fetchable.
pub fn create_router(state: AppState, library_root: &Path) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Capture intents
        .route("/camera/photo", post(handlers::capture_photo))
        .route("/camera/record/start", post(handlers::start_recording))
        .route("/camera/record/pause", post(handlers::pause_recording))
        .route("/camera/record/resume", post(handlers::resume_recording))
        .route("/camera/record/stop", post(handlers::stop_recording))
        // Settings toggles
        .route("/camera/switch", post(handlers::switch_camera))
        .route("/camera/flash", post(handlers::toggle_flash))
        .route("/camera/mode", post(handlers::toggle_mode))
        // Queries
        .route("/camera/status", get(handlers::get_status))
        .route("/library", get(handlers::list_library))
        // Saved media, served as-is
        .nest_service("/media", ServeDir::new(library_root))
        // Request logging and open CORS for the UI shell
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
