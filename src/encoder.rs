//! External encoder invocation.
//!
//! The actual re-encoding is done by an `ffmpeg` subprocess with a fixed
//! recipe: H.264 baseline level 3.0 in yuv420p, AAC audio at 44.1 kHz and
//! 128 kb/s, and `+faststart` so playback can begin before the whole file
//! has downloaded. The argument list is a compatibility contract and is
//! not configurable; only the executable can be pointed elsewhere.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use webready::{Encoder, FfmpegEncoder};
//!
//! let encoder = FfmpegEncoder::new();
//! encoder.encode(Path::new("clip.avi"), Path::new("clip_web.avi"))?;
//! # Ok::<(), webready::WebReadyError>(())
//! ```

use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use crate::error::WebReadyError;

/// Executable used when no other program is configured.
pub const DEFAULT_FFMPEG_PROGRAM: &str = "ffmpeg";

/// Video options, in the order they are passed after `-i <input>`.
const VIDEO_ARGUMENTS: [&str; 12] = [
    "-c:v",
    "libx264",
    "-profile:v",
    "baseline",
    "-level",
    "3.0",
    "-pix_fmt",
    "yuv420p",
    "-preset",
    "medium",
    "-crf",
    "23",
];

const AUDIO_ARGUMENTS: [&str; 6] = ["-c:a", "aac", "-ar", "44100", "-b:a", "128k"];

const CONTAINER_ARGUMENTS: [&str; 3] = ["-movflags", "+faststart", "-y"];

/// Something that turns one input file into its web-playback output.
///
/// [`BatchConverter`](crate::BatchConverter) is generic over this trait;
/// [`FfmpegEncoder`] is the implementation used in practice.
pub trait Encoder {
    /// Produce `output` from `input`, blocking until done.
    ///
    /// # Errors
    ///
    /// Implementations report any failure as a [`WebReadyError`]; the
    /// batch loop logs it and moves on to the next file.
    fn encode(&self, input: &Path, output: &Path) -> Result<(), WebReadyError>;
}

/// Runs `ffmpeg` as a child process with the fixed web-playback recipe.
///
/// The child inherits stdin/stdout/stderr, so ffmpeg's own progress output
/// is visible on the terminal.
#[derive(Debug, Clone)]
pub struct FfmpegEncoder {
    program: OsString,
}

impl Default for FfmpegEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FfmpegEncoder {
    /// Use `ffmpeg` resolved through `PATH`.
    pub fn new() -> Self {
        Self::with_program(DEFAULT_FFMPEG_PROGRAM)
    }

    /// Use a specific executable (a name looked up on `PATH`, or a path).
    pub fn with_program<S: Into<OsString>>(program: S) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The configured executable.
    pub fn program(&self) -> &Path {
        Path::new(&self.program)
    }

    /// The full argument list (without the program) for one conversion.
    pub fn arguments(input: &Path, output: &Path) -> Vec<OsString> {
        let mut arguments = Vec::with_capacity(
            4 + VIDEO_ARGUMENTS.len() + AUDIO_ARGUMENTS.len() + CONTAINER_ARGUMENTS.len(),
        );
        arguments.push(OsString::from("-i"));
        arguments.push(input.as_os_str().to_owned());
        arguments.extend(
            VIDEO_ARGUMENTS
                .iter()
                .chain(&AUDIO_ARGUMENTS)
                .chain(&CONTAINER_ARGUMENTS)
                .map(OsString::from),
        );
        arguments.push(output.as_os_str().to_owned());
        arguments
    }

    fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }
}

impl Encoder for FfmpegEncoder {
    fn encode(&self, input: &Path, output: &Path) -> Result<(), WebReadyError> {
        let mut command = Command::new(&self.program);
        command.args(Self::arguments(input, output));
        log::debug!("Running {command:?}");

        let status = command
            .status()
            .map_err(|source| WebReadyError::EncoderSpawn {
                program: self.program_name(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(WebReadyError::EncoderFailed {
                program: self.program_name(),
                input: input.to_path_buf(),
                status,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{DEFAULT_FFMPEG_PROGRAM, FfmpegEncoder};

    #[test]
    fn argument_list_matches_recipe() {
        let arguments = FfmpegEncoder::arguments(Path::new("in.mov"), Path::new("in_web.mov"));
        let rendered: Vec<String> = arguments
            .iter()
            .map(|argument| argument.to_string_lossy().into_owned())
            .collect();

        assert_eq!(
            rendered,
            [
                "-i",
                "in.mov",
                "-c:v",
                "libx264",
                "-profile:v",
                "baseline",
                "-level",
                "3.0",
                "-pix_fmt",
                "yuv420p",
                "-preset",
                "medium",
                "-crf",
                "23",
                "-c:a",
                "aac",
                "-ar",
                "44100",
                "-b:a",
                "128k",
                "-movflags",
                "+faststart",
                "-y",
                "in_web.mov",
            ]
        );
    }

    #[test]
    fn default_program_is_ffmpeg() {
        let encoder = FfmpegEncoder::default();
        assert_eq!(encoder.program(), Path::new(DEFAULT_FFMPEG_PROGRAM));
    }

    #[test]
    fn custom_program_is_kept() {
        let encoder = FfmpegEncoder::with_program("/opt/ffmpeg/bin/ffmpeg");
        assert_eq!(encoder.program(), Path::new("/opt/ffmpeg/bin/ffmpeg"));
    }
}
