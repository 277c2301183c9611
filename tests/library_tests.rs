// Integration tests for the on-disk media library
//
// These tests verify the filing rules: photos go into the album
// subdirectory, videos into the library root, filenames carry the capture
// timestamp, and failures are reported without retries.

use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use viewfinder::capture::{CameraFacing, MediaFile, MediaKind};
use viewfinder::library::{MediaLibrary, SaveError};

fn media_file(kind: MediaKind, path: PathBuf, captured_at: DateTime<Utc>) -> MediaFile {
    MediaFile {
        id: "0a1b2c3d-4e5f-6071-8293-a4b5c6d7e8f9".to_string(),
        kind,
        path,
        facing: CameraFacing::Back,
        recorded_secs: match kind {
            MediaKind::Photo => None,
            MediaKind::Video => Some(12),
        },
        captured_at,
    }
}

fn capture_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 25, 14, 30, 5).unwrap()
}

#[test]
fn test_photo_goes_to_album() -> Result<()> {
    let staging = TempDir::new()?;
    let root = TempDir::new()?;
    let library = MediaLibrary::new(root.path().to_path_buf(), "MyAppPhotos".to_string())?;

    let source = staging.path().join("still.png");
    fs::write(&source, b"png bytes")?;

    let saved = library.save(&media_file(MediaKind::Photo, source.clone(), capture_time()))?;

    assert_eq!(saved.kind, MediaKind::Photo);
    assert!(saved.path.starts_with(root.path().join("MyAppPhotos")));
    assert_eq!(saved.bytes, 9);
    assert!(saved.recorded_secs.is_none());

    let name = saved.path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("IMG_20260825_143005_"), "name was {}", name);
    assert!(name.ends_with(".png"));

    // the staging file was moved, not copied
    assert!(!source.exists());
    assert!(saved.path.exists());

    Ok(())
}

#[test]
fn test_video_goes_to_library_root() -> Result<()> {
    let staging = TempDir::new()?;
    let root = TempDir::new()?;
    let library = MediaLibrary::new(root.path().to_path_buf(), "MyAppPhotos".to_string())?;

    let source = staging.path().join("clip.y4m");
    fs::write(&source, b"clip bytes!")?;

    let saved = library.save(&media_file(MediaKind::Video, source, capture_time()))?;

    assert_eq!(saved.kind, MediaKind::Video);
    assert_eq!(saved.path.parent().unwrap(), root.path());
    assert_eq!(saved.recorded_secs, Some(12));

    let name = saved.path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("VID_20260825_143005_"), "name was {}", name);
    assert!(name.ends_with(".y4m"));

    Ok(())
}

#[test]
fn test_missing_source_is_reported() -> Result<()> {
    let root = TempDir::new()?;
    let library = MediaLibrary::new(root.path().to_path_buf(), "MyAppPhotos".to_string())?;

    let gone = root.path().join("never-existed.png");
    let result = library.save(&media_file(MediaKind::Photo, gone.clone(), capture_time()));

    match result {
        Err(SaveError::SourceMissing(path)) => assert_eq!(path, gone),
        other => panic!("expected SourceMissing, got {:?}", other.map(|s| s.path)),
    }

    Ok(())
}

#[test]
fn test_list_reports_kinds_and_relative_paths() -> Result<()> {
    let staging = TempDir::new()?;
    let root = TempDir::new()?;
    let library = MediaLibrary::new(root.path().to_path_buf(), "MyAppPhotos".to_string())?;

    let photo_src = staging.path().join("still.png");
    fs::write(&photo_src, b"png")?;
    library.save(&media_file(MediaKind::Photo, photo_src, capture_time()))?;

    let clip_src = staging.path().join("clip.y4m");
    fs::write(&clip_src, b"y4m")?;
    library.save(&media_file(MediaKind::Video, clip_src, capture_time()))?;

    let entries = library.list()?;
    assert_eq!(entries.len(), 2);

    let photo = entries.iter().find(|e| e.kind == MediaKind::Photo).unwrap();
    assert!(photo.relative_path.starts_with("MyAppPhotos/IMG_"));
    assert_eq!(photo.bytes, 3);

    let video = entries.iter().find(|e| e.kind == MediaKind::Video).unwrap();
    assert!(video.relative_path.starts_with("VID_"));
    assert!(!video.relative_path.contains('/'));

    Ok(())
}

#[test]
fn test_empty_library_lists_nothing() -> Result<()> {
    let root = TempDir::new()?;
    let library = MediaLibrary::new(root.path().to_path_buf(), "MyAppPhotos".to_string())?;

    assert_eq!(library.root(), root.path());
    assert_eq!(library.album(), "MyAppPhotos");
    assert!(library.list()?.is_empty());
    Ok(())
}

#[test]
fn test_filename_short_id_strips_dashes() -> Result<()> {
    let staging = TempDir::new()?;
    let root = TempDir::new()?;
    let library = MediaLibrary::new(root.path().to_path_buf(), "MyAppPhotos".to_string())?;

    let source = staging.path().join("still.png");
    fs::write(&source, b"png")?;

    let saved = library.save(&media_file(MediaKind::Photo, source, capture_time()))?;
    let name = saved.path.file_name().unwrap().to_string_lossy().into_owned();

    // first eight hex chars of the id, dashes skipped
    assert_eq!(name, "IMG_20260825_143005_0a1b2c3d.png");

    Ok(())
}
