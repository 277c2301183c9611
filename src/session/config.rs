use serde::{Deserialize, Serialize};

use crate::capture::{CameraFacing, FlashMode};
use super::state::CaptureMode;

/// Initial settings for the camera session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Camera the session opens with
    pub facing: CameraFacing,

    /// Flash setting the session opens with (only effective on cameras
    /// that have flash hardware)
    pub flash: FlashMode,

    /// Control cluster the UI opens with
    pub mode: CaptureMode,

    /// Prefix for generated clip ids (e.g. "clip" -> "clip-<uuid>")
    pub clip_prefix: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            facing: CameraFacing::Front,
            flash: FlashMode::Off,
            mode: CaptureMode::Photo,
            clip_prefix: "clip".to_string(),
        }
    }
}
