use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::capture::{MediaFile, MediaKind};

/// Errors from moving captured media into the library
#[derive(Error, Debug)]
pub enum SaveError {
    #[error("Capture file is missing: {}", .0.display())]
    SourceMissing(PathBuf),

    #[error("Library I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A media file after it has been filed into the library
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedMedia {
    pub kind: MediaKind,
    /// Final location inside the library
    pub path: PathBuf,
    pub bytes: u64,
    /// Clip length in seconds for videos, absent for photos
    pub recorded_secs: Option<u64>,
    pub saved_at: DateTime<Utc>,
}

/// One library file as reported by a listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryEntry {
    pub name: String,
    pub kind: MediaKind,
    pub bytes: u64,
    /// Path relative to the library root, usable as a URL path
    pub relative_path: String,
}

/// On-disk media library
///
/// Photos are filed into a named album directory, videos go to the library
/// root. Filenames carry the capture timestamp so listings sort by time.
pub struct MediaLibrary {
    root: PathBuf,
    album: String,
}

impl MediaLibrary {
    pub fn new(root: PathBuf, album: String) -> Result<Self, SaveError> {
        fs::create_dir_all(&root)?;
        fs::create_dir_all(root.join(&album))?;

        info!(
            "Media library ready at {} (album: {})",
            root.display(),
            album
        );

        Ok(Self { root, album })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn album(&self) -> &str {
        &self.album
    }

    /// Move a captured file into the library
    pub fn save(&self, media: &MediaFile) -> Result<SavedMedia, SaveError> {
        if !media.path.exists() {
            return Err(SaveError::SourceMissing(media.path.clone()));
        }

        let name = library_name(media);
        let dest = match media.kind {
            MediaKind::Photo => self.root.join(&self.album).join(&name),
            MediaKind::Video => self.root.join(&name),
        };

        move_file(&media.path, &dest)?;
        let bytes = fs::metadata(&dest)?.len();

        info!("Saved {} {} to {}", media.kind, media.id, dest.display());

        Ok(SavedMedia {
            kind: media.kind,
            path: dest,
            bytes,
            recorded_secs: media.recorded_secs,
            saved_at: Utc::now(),
        })
    }

    /// List library contents, album photos first, newest first within each group
    pub fn list(&self) -> Result<Vec<LibraryEntry>, SaveError> {
        let mut entries = Vec::new();

        let album_dir = self.root.join(&self.album);
        for entry in read_files(&album_dir)? {
            let name = entry.file_name().to_string_lossy().into_owned();
            entries.push(LibraryEntry {
                relative_path: format!("{}/{}", self.album, name),
                kind: MediaKind::Photo,
                bytes: entry.metadata()?.len(),
                name,
            });
        }

        for entry in read_files(&self.root)? {
            let name = entry.file_name().to_string_lossy().into_owned();
            entries.push(LibraryEntry {
                relative_path: name.clone(),
                kind: MediaKind::Video,
                bytes: entry.metadata()?.len(),
                name,
            });
        }

        entries.sort_by(|a, b| {
            (b.kind == MediaKind::Photo, &b.name).cmp(&(a.kind == MediaKind::Photo, &a.name))
        });

        Ok(entries)
    }
}

/// IMG_/VID_ + capture timestamp + short id, keeping the staging extension
fn library_name(media: &MediaFile) -> String {
    let prefix = match media.kind {
        MediaKind::Photo => "IMG",
        MediaKind::Video => "VID",
    };
    let stamp = media.captured_at.format("%Y%m%d_%H%M%S");
    let short_id: String = media.id.chars().filter(|c| *c != '-').take(8).collect();
    let ext = media
        .path
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "bin".to_string());

    format!("{}_{}_{}.{}", prefix, stamp, short_id, ext)
}

/// Rename, falling back to copy+remove when staging and library sit on
/// different filesystems
fn move_file(src: &Path, dest: &Path) -> std::io::Result<()> {
    match fs::rename(src, dest) {
        Ok(()) => Ok(()),
        Err(_) => {
            fs::copy(src, dest)?;
            fs::remove_file(src)?;
            Ok(())
        }
    }
}

fn read_files(dir: &Path) -> std::io::Result<Vec<fs::DirEntry>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry);
        }
    }
    Ok(files)
}
