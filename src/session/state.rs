//! Session state types
//!
//! The recording state machine, the capture mode, transient banners, and the
//! derived view of which controls apply in the current state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::capture::{CameraFacing, FlashMode};
use crate::library::SavedMedia;

/// Current state of the recording session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordingState {
    /// No recording in progress
    Idle,
    /// Currently recording
    Recording,
    /// Recording is paused
    Paused,
}

impl Default for RecordingState {
    fn default() -> Self {
        Self::Idle
    }
}

impl RecordingState {
    /// A clip is open (recording or paused)
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Recording | Self::Paused)
    }
}

impl fmt::Display for RecordingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Recording => write!(f, "recording"),
            Self::Paused => write!(f, "paused"),
        }
    }
}

/// Which control cluster the UI shows
///
/// Presentation-only: it selects the photo or video controls and never gates
/// the capture intents themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureMode {
    Photo,
    Video,
}

impl Default for CaptureMode {
    fn default() -> Self {
        Self::Photo
    }
}

impl CaptureMode {
    pub fn toggled(&self) -> Self {
        match self {
            Self::Photo => Self::Video,
            Self::Video => Self::Photo,
        }
    }
}

impl fmt::Display for CaptureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Photo => write!(f, "photo"),
            Self::Video => write!(f, "video"),
        }
    }
}

/// Transient on-screen notice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerKind {
    Error,
    Success,
}

/// Contract violation: an intent that is not valid in the current state
///
/// Capture and save failures are not errors at this level; the controller
/// absorbs those into banners and events.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Cannot {intent} while {state}")]
    InvalidState {
        intent: &'static str,
        state: RecordingState,
    },
}

/// Which controls apply right now, derived from session state
///
/// Nothing here is tracked independently; the whole struct is a pure
/// function of (state, mode, facing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlsView {
    /// Photo shutter button
    pub shutter: bool,
    /// Start-recording button
    pub record: bool,
    /// Pause button
    pub pause: bool,
    /// Resume button
    pub resume: bool,
    /// Stop (cancel) button
    pub stop: bool,
    /// Elapsed-time readout
    pub timer: bool,
    /// Photo/video mode switch
    pub mode_toggle: bool,
    /// Flash on/off switch (back camera only)
    pub flash_toggle: bool,
}

impl ControlsView {
    pub fn derive(state: RecordingState, mode: CaptureMode, facing: CameraFacing) -> Self {
        Self {
            shutter: mode == CaptureMode::Photo && state == RecordingState::Idle,
            record: mode == CaptureMode::Video && state == RecordingState::Idle,
            pause: state == RecordingState::Recording,
            resume: state == RecordingState::Paused,
            stop: state.is_live(),
            timer: mode == CaptureMode::Video,
            mode_toggle: state == RecordingState::Idle,
            flash_toggle: facing == CameraFacing::Back,
        }
    }
}

/// Full session snapshot as reported to the UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStatus {
    pub state: RecordingState,
    pub mode: CaptureMode,
    pub facing: CameraFacing,
    pub flash: FlashMode,
    /// Whole seconds recorded so far in the open clip
    pub elapsed_secs: u64,
    /// `elapsed_secs` rendered as HH:MM:SS
    pub timer: String,
    pub recording_since: Option<DateTime<Utc>>,
    pub banner: Option<Banner>,
    pub controls: ControlsView,
}

/// Session lifecycle notifications, broadcast to any interested listener
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CameraEvent {
    RecordingStarted { clip_id: String },
    RecordingPaused { clip_id: String },
    RecordingResumed { clip_id: String },
    RecordingStopped { clip_id: String, saved: Option<SavedMedia> },
    PhotoSaved { saved: SavedMedia },
    CaptureFailed { message: String },
    SaveFailed { message: String },
}
