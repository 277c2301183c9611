pub mod backend;
pub mod synthetic;

pub use backend::{
    CameraBackend, CameraBackendFactory, CameraFacing, CameraSource, CaptureConfig, CaptureError,
    CaptureFormat, FlashMode, MediaFile, MediaKind, QualityBalance, Stabilization,
};
pub use synthetic::SyntheticCamera;
