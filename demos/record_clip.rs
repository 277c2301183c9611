// Example: drive a full camera session headlessly
//
// This example demonstrates the complete capture pipeline:
// 1. Create the synthetic camera backend
// 2. Take a photo and file it into the library
// 3. Record a clip with a pause in the middle
// 4. Stop and show the library contents
//
// Usage: cargo run --example record_clip -- --duration 6

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, Level};
use viewfinder::capture::{CameraBackendFactory, CameraSource, CaptureConfig};
use viewfinder::{CameraController, MediaLibrary, SessionConfig};

#[derive(Parser)]
#[command(name = "record_clip")]
#[command(about = "Record a synthetic clip with a pause in the middle")]
struct Args {
    /// Seconds to record on each side of the pause
    #[arg(short, long, default_value = "3")]
    duration: u64,

    /// Library root directory
    #[arg(short, long, default_value = "media/demo-library")]
    library_root: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let args = Args::parse();

    info!("Viewfinder - Recording Example");
    info!("Recording {}s, pausing, then {}s more", args.duration, args.duration);

    let library = MediaLibrary::new(PathBuf::from(&args.library_root), "MyAppPhotos".to_string())?;

    let backend =
        CameraBackendFactory::create(CameraSource::Synthetic, CaptureConfig::default())?;

    let mut controller = CameraController::new(SessionConfig::default(), backend, library);

    // A photo first
    if let Some(saved) = controller.capture_photo().await? {
        info!("Photo landed at {}", saved.path.display());
    }

    // Then a clip with a pause in the middle
    controller.start_recording().await?;
    sleep(Duration::from_secs(args.duration)).await;

    controller.pause_recording().await?;
    info!("Paused at {}", controller.status().await.timer);
    sleep(Duration::from_secs(2)).await;

    controller.resume_recording().await?;
    sleep(Duration::from_secs(args.duration)).await;

    match controller.stop_recording().await? {
        Some(saved) => info!(
            "Clip landed at {} ({} bytes, ~{}s recorded)",
            saved.path.display(),
            saved.bytes,
            saved.recorded_secs.unwrap_or(0)
        ),
        None => info!("Clip was not saved"),
    }

    info!("Library contents:");
    for entry in controller.library().list()? {
        info!("  - {} ({}, {} bytes)", entry.relative_path, entry.kind, entry.bytes);
    }

    Ok(())
}
