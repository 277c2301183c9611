use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which physical camera is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraFacing {
    /// Selfie camera
    Front,
    /// Main camera
    Back,
}

impl CameraFacing {
    /// The other camera (switch-camera intent)
    pub fn flipped(self) -> Self {
        match self {
            CameraFacing::Front => CameraFacing::Back,
            CameraFacing::Back => CameraFacing::Front,
        }
    }
}

impl fmt::Display for CameraFacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraFacing::Front => write!(f, "front"),
            CameraFacing::Back => write!(f, "back"),
        }
    }
}

/// Flash setting; only applied when the active camera has flash hardware
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashMode {
    On,
    Off,
}

impl FlashMode {
    pub fn toggled(self) -> Self {
        match self {
            FlashMode::On => FlashMode::Off,
            FlashMode::Off => FlashMode::On,
        }
    }
}

impl fmt::Display for FlashMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlashMode::On => write!(f, "on"),
            FlashMode::Off => write!(f, "off"),
        }
    }
}

/// What a finished capture contains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Photo,
    Video,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Photo => write!(f, "photo"),
            MediaKind::Video => write!(f, "video"),
        }
    }
}

/// A finished capture sitting in the staging directory, waiting to be
/// handed to the media library. Not retained after the hand-off.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaFile {
    /// Capture id (photo uuid or clip id)
    pub id: String,

    pub kind: MediaKind,

    /// Staging path produced by the backend
    pub path: PathBuf,

    /// Camera that produced the capture
    pub facing: CameraFacing,

    /// Recorded duration in whole seconds (videos only)
    pub recorded_secs: Option<u64>,

    /// When the capture finished
    pub captured_at: DateTime<Utc>,
}

/// Video stabilization preference, forwarded to the capture pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stabilization {
    Off,
    Standard,
    Cinematic,
}

/// Still-capture speed/quality trade-off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityBalance {
    Speed,
    Balanced,
    Quality,
}

/// Format preferences handed to the backend at construction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureFormat {
    /// Prefer HDR for stills when the pipeline supports it
    pub photo_hdr: bool,
    /// Prefer HDR for clips when the pipeline supports it
    pub video_hdr: bool,
    pub stabilization: Stabilization,
    pub quality: QualityBalance,
}

impl Default for CaptureFormat {
    fn default() -> Self {
        Self {
            photo_hdr: true,
            video_hdr: true,
            stabilization: Stabilization::Cinematic,
            quality: QualityBalance::Quality,
        }
    }
}

/// Configuration for a capture backend
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Where finished captures are staged before the library claims them
    pub staging_dir: PathBuf,

    /// Camera active when the backend opens
    pub facing: CameraFacing,

    /// Clip frame rate in frames per second
    pub frame_rate: u32,

    /// Frame width in pixels
    pub width: u32,

    /// Frame height in pixels
    pub height: u32,

    pub format: CaptureFormat,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            staging_dir: std::env::temp_dir().join("viewfinder").join("staging"),
            facing: CameraFacing::Front,
            frame_rate: 10,
            width: 160,
            height: 120,
            format: CaptureFormat::default(),
        }
    }
}

/// Failure of a capture call. Recovered locally by the session controller;
/// never escalates past a transient banner.
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("camera unavailable: {0}")]
    Unavailable(String),

    #[error("capture failed: {0}")]
    Failed(String),

    #[error("no recording in progress")]
    NotRecording,

    #[error("recording already in progress")]
    AlreadyRecording,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Camera capture backend trait
///
/// Implementations:
/// - Synthetic: built-in frame generator (headless operation, tests)
/// - Device: platform capture pipeline, when one is compiled in
#[async_trait::async_trait]
pub trait CameraBackend: Send + Sync {
    /// Capture a still into the staging directory
    async fn take_photo(&mut self, flash: FlashMode) -> Result<MediaFile, CaptureError>;

    /// Begin recording a clip under the given id
    async fn start_recording(&mut self, clip_id: &str) -> Result<(), CaptureError>;

    /// Suspend frame capture without finishing the clip
    async fn pause_recording(&mut self) -> Result<(), CaptureError>;

    /// Continue a paused clip
    async fn resume_recording(&mut self) -> Result<(), CaptureError>;

    /// Finish the clip and return the staged file
    async fn stop_recording(&mut self) -> Result<MediaFile, CaptureError>;

    /// Point the backend at the other camera; allowed mid-recording
    async fn set_facing(&mut self, facing: CameraFacing) -> Result<(), CaptureError>;

    /// Whether the given camera has flash hardware
    fn has_flash(&self, facing: CameraFacing) -> bool;

    /// Whether a clip is currently open (recording or paused)
    fn is_recording(&self) -> bool;

    /// Backend name for logging
    fn name(&self) -> &str;
}

/// Camera backend factory
pub struct CameraBackendFactory;

impl CameraBackendFactory {
    /// Create a backend for the requested source
    pub fn create(source: CameraSource, config: CaptureConfig) -> Result<Box<dyn CameraBackend>> {
        match source {
            CameraSource::Synthetic => {
                let backend = super::synthetic::SyntheticCamera::new(config)?;
                Ok(Box::new(backend))
            }

            CameraSource::Device(id) => {
                anyhow::bail!(
                    "device camera '{}' requires a native capture pipeline, which is not \
                     compiled into this build; use the synthetic backend or grant camera \
                     access in the platform settings and rebuild with a device backend",
                    id
                )
            }
        }
    }
}

/// Capture source selection
#[derive(Debug, Clone)]
pub enum CameraSource {
    /// Built-in frame generator
    Synthetic,
    /// A physical camera, by platform device id
    Device(String),
}
