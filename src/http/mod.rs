//! HTTP API server for the camera UI shell
//!
//! This module provides the REST surface the UI drives:
//! - POST /camera/photo - Take a photo
//! - POST /camera/record/start|pause|resume|stop - Recording control
//! - POST /camera/switch|flash|mode - Settings toggles
//! - GET /camera/status - Full session snapshot
//! - GET /library - Saved media listing
//! - GET /media/* - Saved media files
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
