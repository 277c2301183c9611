pub mod capture;
pub mod config;
pub mod events;
pub mod http;
pub mod library;
pub mod session;

pub use capture::{
    CameraBackend, CameraBackendFactory, CameraFacing, CameraSource, CaptureConfig, CaptureError,
    CaptureFormat, FlashMode, MediaFile, MediaKind, SyntheticCamera,
};
pub use config::Config;
pub use events::{BusClient, MediaSavedMessage, RecordingEventMessage, RemoteTriggerMessage};
pub use http::{create_router, AppState};
pub use library::{LibraryEntry, MediaLibrary, SaveError, SavedMedia};
pub use session::{
    format_hms, Banner, BannerKind, CameraController, CameraEvent, CaptureMode, ControlsView,
    RecordingState, SessionConfig, SessionError, SessionStatus,
};
