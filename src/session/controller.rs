use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, Mutex};
use tokio::time;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::config::SessionConfig;
use super::state::{
    Banner, BannerKind, CameraEvent, CaptureMode, ControlsView, RecordingState, SessionError,
    SessionStatus,
};
use super::timer::RecordingTimer;
use crate::capture::{CameraBackend, CameraFacing, FlashMode};
use crate::library::{MediaLibrary, SavedMedia};

/// Error banners linger for three seconds
const FAILURE_BANNER_SECS: u64 = 3;

/// The photo-saved flash clears after one second
const SAVED_BANNER_SECS: u64 = 1;

/// Transient banner plus the generation that owns it; expiry tasks only
/// clear the slot when their generation is still current
#[derive(Default)]
struct BannerSlot {
    current: Option<Banner>,
    generation: u64,
}

/// A camera session that manages the recording state machine, the elapsed
/// timer, capture and persistence hand-offs, and transient banners
pub struct CameraController {
    /// Session configuration
    config: SessionConfig,

    /// Capture service the intents are forwarded to
    backend: Box<dyn CameraBackend>,

    /// Persistence service finished media is handed to
    library: MediaLibrary,

    /// Recording state machine
    state: RecordingState,

    /// Which control cluster the UI shows
    mode: CaptureMode,

    /// Selected camera
    facing: CameraFacing,

    /// Requested flash setting (resolved against facing at capture time)
    flash: FlashMode,

    /// Elapsed-seconds counter for the open clip
    timer: RecordingTimer,

    /// When the open clip started, if any
    recording_since: Option<DateTime<Utc>>,

    /// Id of the open clip, if any
    active_clip: Option<String>,

    /// Transient banner shared with expiry tasks
    banner: Arc<Mutex<BannerSlot>>,

    /// Lifecycle event broadcast
    event_tx: broadcast::Sender<CameraEvent>,
}

impl CameraController {
    pub fn new(
        config: SessionConfig,
        backend: Box<dyn CameraBackend>,
        library: MediaLibrary,
    ) -> Self {
        let (event_tx, _) = broadcast::channel(64);

        info!(
            "Camera session ready: backend {}, facing {}, flash {}, mode {}",
            backend.name(),
            config.facing,
            config.flash,
            config.mode
        );

        let facing = config.facing;
        let flash = config.flash;
        let mode = config.mode;

        Self {
            config,
            backend,
            library,
            state: RecordingState::Idle,
            mode,
            facing,
            flash,
            timer: RecordingTimer::new(),
            recording_since: None,
            active_clip: None,
            banner: Arc::new(Mutex::new(BannerSlot::default())),
            event_tx,
        }
    }

    /// Subscribe to session lifecycle events
    pub fn subscribe(&self) -> broadcast::Receiver<CameraEvent> {
        self.event_tx.subscribe()
    }

    pub fn state(&self) -> RecordingState {
        self.state
    }

    pub fn library(&self) -> &MediaLibrary {
        &self.library
    }

    /// Take a photo and file it into the library
    ///
    /// Capture and save failures are absorbed: they surface as a banner and
    /// an event, and the call returns `Ok(None)`.
    pub async fn capture_photo(&mut self) -> Result<Option<SavedMedia>, SessionError> {
        if self.state != RecordingState::Idle {
            return Err(SessionError::InvalidState {
                intent: "capture photo",
                state: self.state,
            });
        }

        let flash = self.effective_flash();
        match self.backend.take_photo(flash).await {
            Ok(media) => match self.library.save(&media) {
                Ok(saved) => {
                    info!("Photo {} saved to {}", media.id, saved.path.display());
                    self.set_banner(BannerKind::Success, "Photo saved", SAVED_BANNER_SECS)
                        .await;
                    let _ = self.event_tx.send(CameraEvent::PhotoSaved {
                        saved: saved.clone(),
                    });
                    Ok(Some(saved))
                }
                Err(e) => {
                    error!("Failed to save photo: {}", e);
                    self.set_banner(
                        BannerKind::Error,
                        "Failed to save photo. Please check permissions.",
                        FAILURE_BANNER_SECS,
                    )
                    .await;
                    let _ = self.event_tx.send(CameraEvent::SaveFailed {
                        message: e.to_string(),
                    });
                    Ok(None)
                }
            },
            Err(e) => {
                error!("Failed to take photo: {}", e);
                self.set_banner(
                    BannerKind::Error,
                    "Failed to capture photo. Please try again.",
                    FAILURE_BANNER_SECS,
                )
                .await;
                let _ = self.event_tx.send(CameraEvent::CaptureFailed {
                    message: e.to_string(),
                });
                Ok(None)
            }
        }
    }

    /// Open a new clip and start the timer
    ///
    /// Starting while a clip is already open is a no-op.
    pub async fn start_recording(&mut self) -> Result<SessionStatus, SessionError> {
        if self.state.is_live() {
            warn!("Recording already started");
            return Ok(self.status().await);
        }

        let clip_id = format!("{}-{}", self.config.clip_prefix, Uuid::new_v4());
        match self.backend.start_recording(&clip_id).await {
            Ok(()) => {
                self.state = RecordingState::Recording;
                self.recording_since = Some(Utc::now());
                self.active_clip = Some(clip_id.clone());
                self.timer.start();
                info!("Recording started: {}", clip_id);
                let _ = self.event_tx.send(CameraEvent::RecordingStarted { clip_id });
            }
            Err(e) => {
                error!("Failed to start recording: {}", e);
                self.set_banner(
                    BannerKind::Error,
                    "Failed to record video. Please try again.",
                    FAILURE_BANNER_SECS,
                )
                .await;
                let _ = self.event_tx.send(CameraEvent::CaptureFailed {
                    message: e.to_string(),
                });
            }
        }

        Ok(self.status().await)
    }

    /// Pause the open clip; the timer freezes at its current value
    pub async fn pause_recording(&mut self) -> Result<SessionStatus, SessionError> {
        if self.state != RecordingState::Recording {
            return Err(SessionError::InvalidState {
                intent: "pause recording",
                state: self.state,
            });
        }

        match self.backend.pause_recording().await {
            Ok(()) => {
                self.state = RecordingState::Paused;
                self.timer.pause();
                info!("Recording paused at {}", self.timer.display());
                if let Some(clip_id) = &self.active_clip {
                    let _ = self.event_tx.send(CameraEvent::RecordingPaused {
                        clip_id: clip_id.clone(),
                    });
                }
            }
            Err(e) => {
                error!("Failed to pause recording: {}", e);
                self.set_banner(
                    BannerKind::Error,
                    "Failed to record video. Please try again.",
                    FAILURE_BANNER_SECS,
                )
                .await;
                let _ = self.event_tx.send(CameraEvent::CaptureFailed {
                    message: e.to_string(),
                });
            }
        }

        Ok(self.status().await)
    }

    /// Resume the paused clip; the timer continues from where it froze
    pub async fn resume_recording(&mut self) -> Result<SessionStatus, SessionError> {
        if self.state != RecordingState::Paused {
            return Err(SessionError::InvalidState {
                intent: "resume recording",
                state: self.state,
            });
        }

        match self.backend.resume_recording().await {
            Ok(()) => {
                self.state = RecordingState::Recording;
                self.timer.resume();
                info!("Recording resumed at {}", self.timer.display());
                if let Some(clip_id) = &self.active_clip {
                    let _ = self.event_tx.send(CameraEvent::RecordingResumed {
                        clip_id: clip_id.clone(),
                    });
                }
            }
            Err(e) => {
                error!("Failed to resume recording: {}", e);
                self.set_banner(
                    BannerKind::Error,
                    "Failed to record video. Please try again.",
                    FAILURE_BANNER_SECS,
                )
                .await;
                let _ = self.event_tx.send(CameraEvent::CaptureFailed {
                    message: e.to_string(),
                });
            }
        }

        Ok(self.status().await)
    }

    /// Close the open clip and file it into the library
    ///
    /// The transition back to Idle and the timer reset are unconditional;
    /// a failed stop or save still leaves the session Idle. The backend
    /// sees exactly one stop call.
    pub async fn stop_recording(&mut self) -> Result<Option<SavedMedia>, SessionError> {
        if !self.state.is_live() {
            return Err(SessionError::InvalidState {
                intent: "stop recording",
                state: self.state,
            });
        }

        self.state = RecordingState::Idle;
        self.timer.reset();
        self.recording_since = None;
        let clip_id = self.active_clip.take().unwrap_or_default();

        match self.backend.stop_recording().await {
            Ok(media) => match self.library.save(&media) {
                Ok(saved) => {
                    info!("Clip {} saved to {}", clip_id, saved.path.display());
                    let _ = self.event_tx.send(CameraEvent::RecordingStopped {
                        clip_id,
                        saved: Some(saved.clone()),
                    });
                    Ok(Some(saved))
                }
                Err(e) => {
                    error!("Failed to save clip {}: {}", clip_id, e);
                    self.set_banner(
                        BannerKind::Error,
                        "Failed to save video. Please check permissions.",
                        FAILURE_BANNER_SECS,
                    )
                    .await;
                    let _ = self.event_tx.send(CameraEvent::SaveFailed {
                        message: e.to_string(),
                    });
                    let _ = self.event_tx.send(CameraEvent::RecordingStopped {
                        clip_id,
                        saved: None,
                    });
                    Ok(None)
                }
            },
            Err(e) => {
                error!("Failed to stop recording {}: {}", clip_id, e);
                self.set_banner(
                    BannerKind::Error,
                    "Failed to record video. Please try again.",
                    FAILURE_BANNER_SECS,
                )
                .await;
                let _ = self.event_tx.send(CameraEvent::CaptureFailed {
                    message: e.to_string(),
                });
                let _ = self.event_tx.send(CameraEvent::RecordingStopped {
                    clip_id,
                    saved: None,
                });
                Ok(None)
            }
        }
    }

    /// Flip between front and back cameras
    ///
    /// Allowed in any state, including mid-recording.
    pub async fn switch_camera(&mut self) -> SessionStatus {
        self.facing = self.facing.flipped();
        if let Err(e) = self.backend.set_facing(self.facing).await {
            warn!("Backend rejected facing change: {}", e);
        }
        info!("Camera facing now {}", self.facing);
        self.status().await
    }

    /// Flip the requested flash setting
    pub async fn toggle_flash(&mut self) -> SessionStatus {
        self.flash = self.flash.toggled();
        info!("Flash {}", self.flash);
        self.status().await
    }

    /// Flip between the photo and video control clusters
    ///
    /// Ignored while a clip is open.
    pub async fn toggle_mode(&mut self) -> SessionStatus {
        if self.state.is_live() {
            warn!("Cannot switch capture mode while {}", self.state);
            return self.status().await;
        }
        self.mode = self.mode.toggled();
        info!("Capture mode {}", self.mode);
        self.status().await
    }

    /// Current session snapshot
    pub async fn status(&self) -> SessionStatus {
        let banner = { self.banner.lock().await.current.clone() };

        SessionStatus {
            state: self.state,
            mode: self.mode,
            facing: self.facing,
            flash: self.flash,
            elapsed_secs: self.timer.elapsed_secs(),
            timer: self.timer.display(),
            recording_since: self.recording_since,
            banner,
            controls: ControlsView::derive(self.state, self.mode, self.facing),
        }
    }

    /// Flash only fires on a camera that has the hardware; the front camera
    /// never does
    fn effective_flash(&self) -> FlashMode {
        if self.facing == CameraFacing::Back && self.backend.has_flash(CameraFacing::Back) {
            self.flash
        } else {
            FlashMode::Off
        }
    }

    async fn set_banner(&self, kind: BannerKind, message: &str, ttl_secs: u64) {
        let generation = {
            let mut slot = self.banner.lock().await;
            slot.generation += 1;
            slot.current = Some(Banner {
                kind,
                message: message.to_string(),
            });
            slot.generation
        };

        let slot_ref = Arc::clone(&self.banner);
        tokio::spawn(async move {
            time::sleep(Duration::from_secs(ttl_secs)).await;
            let mut slot = slot_ref.lock().await;
            // a newer banner owns the slot now
            if slot.generation == generation {
                slot.current = None;
            }
        });
    }
}
