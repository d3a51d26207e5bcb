//! Recursive discovery of convertible video files.
//!
//! [`scan_videos`] walks a directory tree and keeps every regular file
//! whose extension, compared case-insensitively, is one of
//! [`VIDEO_EXTENSIONS`]. Results come back in traversal order, which is
//! whatever the filesystem yields and is not guaranteed to be stable.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::WebReadyError;

/// Extensions (without the dot, lowercase) treated as video input.
pub const VIDEO_EXTENSIONS: [&str; 6] = ["mp4", "avi", "mov", "mkv", "webm", "flv"];

/// Returns `true` if `path` carries one of the [`VIDEO_EXTENSIONS`].
///
/// Only the name is inspected; the file does not need to exist.
///
/// ```
/// use std::path::Path;
///
/// assert!(webready::is_video_file(Path::new("clip.MKV")));
/// assert!(!webready::is_video_file(Path::new("notes.txt")));
/// ```
pub fn is_video_file(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| {
            VIDEO_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(extension))
        })
}

/// Collect every video file below `root`, at any depth.
///
/// Symbolic links to files are returned like the files they point at;
/// linked directories are not descended into. Directories are never
/// returned even when their name looks like a video, and neither is
/// `root` itself when it is a file.
///
/// # Errors
///
/// Returns [`WebReadyError::Scan`] if `root` itself cannot be read
/// (missing, not permitted). Unreadable entries deeper in the tree are
/// logged and skipped.
pub fn scan_videos<P: AsRef<Path>>(root: P) -> Result<Vec<PathBuf>, WebReadyError> {
    let root = root.as_ref();
    log::debug!("Scanning {} for video files", root.display());

    let mut videos = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) if error.depth() == 0 => {
                return Err(WebReadyError::Scan {
                    path: root.to_path_buf(),
                    source: error,
                });
            }
            Err(error) => {
                let location = error
                    .path()
                    .map(|path| path.display().to_string())
                    .unwrap_or_else(|| "<unknown>".to_string());
                log::warn!("Skipping unreadable entry {location}: {error}");
                continue;
            }
        };

        if entry.depth() == 0 {
            continue;
        }

        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if is_file && is_video_file(entry.path()) {
            videos.push(entry.into_path());
        }
    }

    log::info!("Found {} video file(s) under {}", videos.len(), root.display());
    Ok(videos)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::is_video_file;

    #[test]
    fn accepts_every_known_extension() {
        for name in ["a.mp4", "a.avi", "a.mov", "a.mkv", "a.webm", "a.flv"] {
            assert!(is_video_file(Path::new(name)), "{name} should match");
        }
    }

    #[test]
    fn extension_match_ignores_case() {
        assert!(is_video_file(Path::new("A.MP4")));
        assert!(is_video_file(Path::new("a.WebM")));
    }

    #[test]
    fn rejects_other_files() {
        assert!(!is_video_file(Path::new("a.txt")));
        assert!(!is_video_file(Path::new("a.mp4.part")));
        assert!(!is_video_file(Path::new("mp4")));
        assert!(!is_video_file(Path::new(".mp4")));
    }
}
