use anyhow::Result;
use serde::Deserialize;

use crate::capture::{CameraFacing, CaptureFormat, FlashMode};
use crate::session::CaptureMode;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub service: ServiceConfig,
    pub camera: CameraConfig,
    pub library: LibraryConfig,
    pub bus: BusConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "viewfinder".to_string(),
            http: HttpConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 3400,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Capture backend: "synthetic", or a device identifier
    pub backend: String,
    pub facing: CameraFacing,
    pub flash: FlashMode,
    pub mode: CaptureMode,
    /// Staging directory for in-flight captures (system temp when unset)
    pub staging_path: Option<String>,
    pub frame_rate: u32,
    pub width: u32,
    pub height: u32,
    pub format: CaptureFormat,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            backend: "synthetic".to_string(),
            facing: CameraFacing::Front,
            flash: FlashMode::Off,
            mode: CaptureMode::Photo,
            staging_path: None,
            frame_rate: 10,
            width: 160,
            height: 120,
            format: CaptureFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    pub root: String,
    /// Album subdirectory photos are filed into
    pub album: String,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            root: "media/library".to_string(),
            album: "MyAppPhotos".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BusConfig {
    /// NATS server URL; bus integration is disabled when unset
    pub url: Option<String>,
    pub subject_prefix: String,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            url: None,
            subject_prefix: "camera".to_string(),
        }
    }
}

impl Config {
    /// Load from a config file, falling back to the in-code defaults when
    /// the file does not exist
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
