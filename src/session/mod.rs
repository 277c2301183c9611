//! Recording session management
//!
//! This module provides the `CameraController` abstraction that manages:
//! - The Idle/Recording/Paused state machine
//! - The one-second elapsed timer for open clips
//! - Capture hand-offs (photos, clip start/pause/resume/stop)
//! - Filing finished media into the library
//! - Transient banners and lifecycle event broadcast

mod config;
mod controller;
mod state;
mod timer;

pub use config::SessionConfig;
pub use controller::CameraController;
pub use state::{
    Banner, BannerKind, CameraEvent, CaptureMode, ControlsView, RecordingState, SessionError,
    SessionStatus,
};
pub use timer::{format_hms, RecordingTimer};
