// Configuration loading tests

use std::fs;
use tempfile::TempDir;
use viewfinder::capture::{QualityBalance, Stabilization};
use viewfinder::{CameraFacing, CaptureMode, Config, FlashMode};

#[test]
fn test_defaults_without_a_config_file() {
    let config = Config::load("/nonexistent/viewfinder").expect("defaults should load");

    assert_eq!(config.service.name, "viewfinder");
    assert_eq!(config.service.http.bind, "0.0.0.0");
    assert_eq!(config.service.http.port, 3400);

    assert_eq!(config.camera.backend, "synthetic");
    assert_eq!(config.camera.facing, CameraFacing::Front);
    assert_eq!(config.camera.flash, FlashMode::Off);
    assert_eq!(config.camera.mode, CaptureMode::Photo);
    assert!(config.camera.staging_path.is_none());
    assert_eq!(config.camera.frame_rate, 10);
    assert_eq!(config.camera.width, 160);
    assert_eq!(config.camera.height, 120);
    assert!(config.camera.format.photo_hdr);
    assert!(config.camera.format.video_hdr);
    assert_eq!(config.camera.format.stabilization, Stabilization::Cinematic);
    assert_eq!(config.camera.format.quality, QualityBalance::Quality);

    assert_eq!(config.library.root, "media/library");
    assert_eq!(config.library.album, "MyAppPhotos");

    assert!(config.bus.url.is_none());
    assert_eq!(config.bus.subject_prefix, "camera");
}

#[test]
fn test_file_overrides_defaults() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(
        dir.path().join("viewfinder.toml"),
        r#"
[service]
name = "kiosk-camera"

[service.http]
port = 8080

[camera]
backend = "avf:0"
facing = "back"
frame_rate = 30
width = 640
height = 480

[camera.format]
photo_hdr = false
stabilization = "standard"

[library]
album = "Kiosk"

[bus]
url = "nats://localhost:4222"
subject_prefix = "kiosk"
"#,
    )
    .expect("write config");

    let name = dir.path().join("viewfinder");
    let config = Config::load(name.to_str().expect("utf-8 path")).expect("config should load");

    assert_eq!(config.service.name, "kiosk-camera");
    assert_eq!(config.service.http.port, 8080);
    // untouched fields keep their defaults
    assert_eq!(config.service.http.bind, "0.0.0.0");

    assert_eq!(config.camera.backend, "avf:0");
    assert_eq!(config.camera.facing, CameraFacing::Back);
    assert_eq!(config.camera.frame_rate, 30);
    assert_eq!(config.camera.width, 640);
    assert_eq!(config.camera.height, 480);
    assert!(!config.camera.format.photo_hdr);
    assert!(config.camera.format.video_hdr);
    assert_eq!(config.camera.format.stabilization, Stabilization::Standard);

    assert_eq!(config.library.album, "Kiosk");
    assert_eq!(config.library.root, "media/library");

    assert_eq!(config.bus.url.as_deref(), Some("nats://localhost:4222"));
    assert_eq!(config.bus.subject_prefix, "kiosk");
}
