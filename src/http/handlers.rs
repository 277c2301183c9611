use super::state::AppState;
use crate::library::{LibraryEntry, SavedMedia};
use crate::session::SessionStatus;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Serialize;
use tracing::error;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct PhotoResponse {
    pub status: SessionStatus,
    /// Library receipt, absent when capture or save failed
    pub saved: Option<SavedMedia>,
}

#[derive(Debug, Serialize)]
pub struct StopRecordingResponse {
    pub status: SessionStatus,
    /// Library receipt, absent when the stop or save failed
    pub saved: Option<SavedMedia>,
}

#[derive(Debug, Serialize)]
pub struct LibraryResponse {
    pub entries: Vec<LibraryEntry>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /camera/photo
/// Take a photo with the current settings and file it into the library
pub async fn capture_photo(State(state): State<AppState>) -> impl IntoResponse {
    let mut controller = state.controller.lock().await;

    match controller.capture_photo().await {
        Ok(saved) => {
            let status = controller.status().await;
            (StatusCode::OK, Json(PhotoResponse { status, saved })).into_response()
        }
        Err(e) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}

/// POST /camera/record/start
/// Open a new clip; a no-op when one is already open
pub async fn start_recording(State(state): State<AppState>) -> impl IntoResponse {
    let mut controller = state.controller.lock().await;

    match controller.start_recording().await {
        Ok(status) => (StatusCode::OK, Json(status)).into_response(),
        Err(e) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}

/// POST /camera/record/pause
pub async fn pause_recording(State(state): State<AppState>) -> impl IntoResponse {
    let mut controller = state.controller.lock().await;

    match controller.pause_recording().await {
        Ok(status) => (StatusCode::OK, Json(status)).into_response(),
        Err(e) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}

/// POST /camera/record/resume
pub async fn resume_recording(State(state): State<AppState>) -> impl IntoResponse {
    let mut controller = state.controller.lock().await;

    match controller.resume_recording().await {
        Ok(status) => (StatusCode::OK, Json(status)).into_response(),
        Err(e) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}

/// POST /camera/record/stop
/// Close the open clip and file it into the library
pub async fn stop_recording(State(state): State<AppState>) -> impl IntoResponse {
    let mut controller = state.controller.lock().await;

    match controller.stop_recording().await {
        Ok(saved) => {
            let status = controller.status().await;
            (StatusCode::OK, Json(StopRecordingResponse { status, saved })).into_response()
        }
        Err(e) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}

/// POST /camera/switch
/// Flip between front and back cameras
pub async fn switch_camera(State(state): State<AppState>) -> impl IntoResponse {
    let mut controller = state.controller.lock().await;
    let status = controller.switch_camera().await;
    (StatusCode::OK, Json(status))
}

/// POST /camera/flash
/// Flip the requested flash setting
pub async fn toggle_flash(State(state): State<AppState>) -> impl IntoResponse {
    let mut controller = state.controller.lock().await;
    let status = controller.toggle_flash().await;
    (StatusCode::OK, Json(status))
}

/// POST /camera/mode
/// Flip between the photo and video control clusters
pub async fn toggle_mode(State(state): State<AppState>) -> impl IntoResponse {
    let mut controller = state.controller.lock().await;
    let status = controller.toggle_mode().await;
    (StatusCode::OK, Json(status))
}

/// GET /camera/status
/// Full session snapshot
pub async fn get_status(State(state): State<AppState>) -> impl IntoResponse {
    let controller = state.controller.lock().await;
    let status = controller.status().await;
    (StatusCode::OK, Json(status))
}

/// GET /library
/// List saved media
pub async fn list_library(State(state): State<AppState>) -> impl IntoResponse {
    let controller = state.controller.lock().await;

    match controller.library().list() {
        Ok(entries) => (StatusCode::OK, Json(LibraryResponse { entries })).into_response(),
        Err(e) => {
            error!("Failed to list library: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to list library: {}", e),
                }),
            )
                .into_response()
        }
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
