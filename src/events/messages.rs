use serde::{Deserialize, Serialize};

use crate::capture::MediaKind;

/// Saved-media notice published to the bus
#[derive(Debug, Serialize, Deserialize)]
pub struct MediaSavedMessage {
    pub kind: MediaKind,
    pub path: String,
    pub bytes: u64,
    /// Clip length in seconds, absent for photos
    pub recorded_secs: Option<u64>,
    pub timestamp: String, // RFC3339 timestamp
}

/// Recording lifecycle notice published to the bus
#[derive(Debug, Serialize, Deserialize)]
pub struct RecordingEventMessage {
    pub event: String, // started | paused | resumed | stopped
    pub clip_id: String,
    pub timestamp: String, // RFC3339 timestamp
}

/// Shutter trigger received from a companion device
#[derive(Debug, Serialize, Deserialize)]
pub struct RemoteTriggerMessage {
    pub action: RemoteAction,
    /// Identifier of the device that sent the trigger
    pub source: String,
    pub timestamp: String, // RFC3339 timestamp
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteAction {
    CapturePhoto,
    StartRecording,
    PauseRecording,
    ResumeRecording,
    StopRecording,
}
