//! Output naming convention.
//!
//! A converted file lives next to its source, with `_web` inserted before
//! the extension: `clips/intro.MOV` becomes `clips/intro_web.MOV`. The
//! mapping is a pure function of the input path, which is what makes the
//! skip-if-exists check in [`BatchConverter`](crate::BatchConverter)
//! meaningful across repeated runs.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Marker inserted between the file stem and its extension.
pub const WEB_SUFFIX: &str = "_web";

/// Compute the web-playback output path for `input`.
///
/// The extension is kept exactly as written (case included). A path with
/// no extension gets the marker appended to its name. Returns `None` when
/// `input` has no file stem (e.g. `/` or `..`).
///
/// # Example
///
/// ```
/// use std::path::Path;
///
/// use webready::web_output_path;
///
/// let output = web_output_path(Path::new("videos/clip.MP4")).unwrap();
/// assert_eq!(output, Path::new("videos/clip_web.MP4"));
/// ```
pub fn web_output_path(input: &Path) -> Option<PathBuf> {
    let stem = input.file_stem()?;

    let mut file_name = OsString::with_capacity(stem.len() + WEB_SUFFIX.len() + 8);
    file_name.push(stem);
    file_name.push(WEB_SUFFIX);
    if let Some(extension) = input.extension() {
        file_name.push(".");
        file_name.push(extension);
    }

    Some(input.with_file_name(file_name))
}
