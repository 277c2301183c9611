use crate::session::CameraController;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// The process-wide camera session
    pub controller: Arc<Mutex<CameraController>>,
}

impl AppState {
    pub fn new(controller: Arc<Mutex<CameraController>>) -> Self {
        Self { controller }
    }
}
