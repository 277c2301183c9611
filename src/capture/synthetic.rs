//! Built-in synthetic camera
//!
//! Produces real files without camera hardware: PNG stills and YUV4MPEG2
//! clips written into the staging directory. Clip frames are generated by a
//! background task at the configured frame rate; pause/resume gates the
//! generator without closing the clip.

use chrono::Utc;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time;
use tracing::{debug, info};
use uuid::Uuid;

use super::backend::{
    CameraBackend, CameraFacing, CaptureConfig, CaptureError, FlashMode, MediaFile, MediaKind,
};

/// Frame-generator gate for the active clip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClipGate {
    Running,
    Paused,
    Stopped,
}

struct ActiveClip {
    clip_id: String,
    path: PathBuf,
    gate: watch::Sender<ClipGate>,
    writer: JoinHandle<std::io::Result<u64>>,
}

pub struct SyntheticCamera {
    config: CaptureConfig,
    facing: CameraFacing,
    clip: Option<ActiveClip>,
}

impl SyntheticCamera {
    pub fn new(mut config: CaptureConfig) -> Result<Self, CaptureError> {
        // 4:2:0 planes need even dimensions
        config.width = config.width.max(2) & !1;
        config.height = config.height.max(2) & !1;

        std::fs::create_dir_all(&config.staging_dir)?;

        info!(
            "Synthetic camera ready: {}x{} @ {} fps, staging at {}",
            config.width,
            config.height,
            config.frame_rate.max(1),
            config.staging_dir.display()
        );
        info!(
            "Capture format: photo_hdr={} video_hdr={} stabilization={:?} quality={:?}",
            config.format.photo_hdr,
            config.format.video_hdr,
            config.format.stabilization,
            config.format.quality
        );

        let facing = config.facing;
        Ok(Self {
            config,
            facing,
            clip: None,
        })
    }

    fn still_path(&self, id: &str) -> PathBuf {
        self.config.staging_dir.join(format!("still-{}.png", id))
    }

    fn clip_path(&self, clip_id: &str) -> PathBuf {
        self.config.staging_dir.join(format!("{}.y4m", clip_id))
    }
}

#[async_trait::async_trait]
impl CameraBackend for SyntheticCamera {
    async fn take_photo(&mut self, flash: FlashMode) -> Result<MediaFile, CaptureError> {
        let id = Uuid::new_v4().to_string();
        let path = self.still_path(&id);

        let pixels = still_pixels(self.config.width, self.config.height, self.facing, flash);
        encode_png(&path, self.config.width, self.config.height, &pixels)?;

        info!(
            "Captured still {} ({}x{}, facing {}, flash {})",
            path.display(),
            self.config.width,
            self.config.height,
            self.facing,
            flash
        );

        Ok(MediaFile {
            id,
            kind: MediaKind::Photo,
            path,
            facing: self.facing,
            recorded_secs: None,
            captured_at: Utc::now(),
        })
    }

    async fn start_recording(&mut self, clip_id: &str) -> Result<(), CaptureError> {
        if self.clip.is_some() {
            return Err(CaptureError::AlreadyRecording);
        }

        let path = self.clip_path(clip_id);
        let file = File::create(&path)?;
        let mut out = BufWriter::new(file);

        let width = self.config.width;
        let height = self.config.height;
        let frame_rate = self.config.frame_rate.max(1);
        write_clip_header(&mut out, width, height, frame_rate)?;

        let (gate, mut gate_rx) = watch::channel(ClipGate::Running);

        let writer = tokio::spawn(async move {
            let mut frames: u64 = 0;
            let period = (1000 / u64::from(frame_rate)).max(1);
            let mut ticks = time::interval(Duration::from_millis(period));
            // the first tick completes immediately
            ticks.tick().await;

            loop {
                tokio::select! {
                    _ = ticks.tick() => {
                        if *gate_rx.borrow() == ClipGate::Running {
                            write_clip_frame(&mut out, width, height, frames)?;
                            frames += 1;
                        }
                    }
                    changed = gate_rx.changed() => {
                        if changed.is_err() || *gate_rx.borrow() == ClipGate::Stopped {
                            break;
                        }
                    }
                }
            }

            out.flush()?;
            Ok::<u64, std::io::Error>(frames)
        });

        info!("Recording clip {} to {}", clip_id, path.display());

        self.clip = Some(ActiveClip {
            clip_id: clip_id.to_string(),
            path,
            gate,
            writer,
        });

        Ok(())
    }

    async fn pause_recording(&mut self) -> Result<(), CaptureError> {
        let clip = self.clip.as_ref().ok_or(CaptureError::NotRecording)?;
        let _ = clip.gate.send(ClipGate::Paused);
        debug!("Clip {} paused", clip.clip_id);
        Ok(())
    }

    async fn resume_recording(&mut self) -> Result<(), CaptureError> {
        let clip = self.clip.as_ref().ok_or(CaptureError::NotRecording)?;
        let _ = clip.gate.send(ClipGate::Running);
        debug!("Clip {} resumed", clip.clip_id);
        Ok(())
    }

    async fn stop_recording(&mut self) -> Result<MediaFile, CaptureError> {
        let clip = self.clip.take().ok_or(CaptureError::NotRecording)?;
        let _ = clip.gate.send(ClipGate::Stopped);

        let frames = clip
            .writer
            .await
            .map_err(|e| CaptureError::Failed(format!("clip writer task failed: {}", e)))??;

        let recorded_secs = frames / u64::from(self.config.frame_rate.max(1));

        info!(
            "Clip {} finished: {} frames (~{}s) at {}",
            clip.clip_id,
            frames,
            recorded_secs,
            clip.path.display()
        );

        Ok(MediaFile {
            id: clip.clip_id,
            kind: MediaKind::Video,
            path: clip.path,
            facing: self.facing,
            recorded_secs: Some(recorded_secs),
            captured_at: Utc::now(),
        })
    }

    async fn set_facing(&mut self, facing: CameraFacing) -> Result<(), CaptureError> {
        self.facing = facing;
        debug!("Facing set to {}", facing);
        Ok(())
    }

    fn has_flash(&self, facing: CameraFacing) -> bool {
        // phones put the flash next to the main camera
        facing == CameraFacing::Back
    }

    fn is_recording(&self) -> bool {
        self.clip.is_some()
    }

    fn name(&self) -> &str {
        "synthetic"
    }
}

/// RGBA gradient still; front captures are mirrored like a selfie preview,
/// flash lifts the exposure
fn still_pixels(width: u32, height: u32, facing: CameraFacing, flash: FlashMode) -> Vec<u8> {
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    let lift = if flash == FlashMode::On { 64u8 } else { 0 };

    for y in 0..height {
        for x in 0..width {
            let px = match facing {
                CameraFacing::Front => width - 1 - x,
                CameraFacing::Back => x,
            };
            let r = ((px * 255) / width.max(1)) as u8;
            let g = ((y * 255) / height.max(1)) as u8;
            pixels.push(r.saturating_add(lift));
            pixels.push(g.saturating_add(lift));
            pixels.push(128u8.saturating_add(lift));
            pixels.push(255);
        }
    }

    pixels
}

fn encode_png(path: &Path, width: u32, height: u32, pixels: &[u8]) -> Result<(), CaptureError> {
    let file = File::create(path)?;
    let out = BufWriter::new(file);

    let mut encoder = png::Encoder::new(out, width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| CaptureError::Failed(format!("png header: {}", e)))?;
    writer
        .write_image_data(pixels)
        .map_err(|e| CaptureError::Failed(format!("png frame: {}", e)))?;

    Ok(())
}

fn write_clip_header(out: &mut impl Write, width: u32, height: u32, fps: u32) -> std::io::Result<()> {
    writeln!(out, "YUV4MPEG2 W{} H{} F{}:1 Ip A1:1 C420", width, height, fps)
}

/// One 4:2:0 frame: drifting luma gradient, neutral chroma
fn write_clip_frame(
    out: &mut impl Write,
    width: u32,
    height: u32,
    index: u64,
) -> std::io::Result<()> {
    out.write_all(b"FRAME\n")?;

    let mut luma = Vec::with_capacity((width * height) as usize);
    for y in 0..height {
        for x in 0..width {
            luma.push(((u64::from(x) + u64::from(y) + index * 4) & 0xff) as u8);
        }
    }
    out.write_all(&luma)?;

    let chroma_len = ((width / 2) * (height / 2)) as usize;
    let chroma = vec![128u8; chroma_len];
    out.write_all(&chroma)?;
    out.write_all(&chroma)?;

    Ok(())
}
