//! The scan-and-convert loop.
//!
//! [`BatchConverter::run`] scans a directory, and for every video found
//! either skips it (its `_web` output already exists) or runs the encoder
//! on it. Files are handled one at a time, in scan order, and a failed
//! conversion never stops the batch. Only a failure to read the root
//! directory aborts a run.
//!
//! A file that is itself the `_web` output of another video in the scan is
//! not treated as an input, so a second run over the same tree starts no
//! encoder at all.
//!
//! An existing output file is never opened or validated: if a previous
//! run was killed halfway through writing it, the truncated file still
//! counts as converted. Delete it to have it redone.
//!
//! # Example
//!
//! ```no_run
//! let report = webready::convert_for_web_playback("videos")?;
//! if report.failed() > 0 {
//!     eprintln!("{} file(s) failed", report.failed());
//! }
//! # Ok::<(), webready::WebReadyError>(())
//! ```

use std::collections::HashSet;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::ConvertOptions;
use crate::encoder::{Encoder, FfmpegEncoder};
use crate::error::WebReadyError;
use crate::naming::web_output_path;
use crate::progress::{ProgressCallback, ProgressEvent, ProgressTracker};
use crate::scan::scan_videos;

/// How a single file was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    /// The output path already existed.
    Skipped,
    /// The encoder finished successfully.
    Converted,
    /// The encoder failed; carries the rendered error.
    Failed(String),
}

impl ConversionOutcome {
    /// Short lowercase label (`skipped`, `converted`, `failed`).
    pub fn label(&self) -> &'static str {
        match self {
            ConversionOutcome::Skipped => "skipped",
            ConversionOutcome::Converted => "converted",
            ConversionOutcome::Failed(_) => "failed",
        }
    }
}

/// One entry of a [`ConversionReport`].
#[derive(Debug, Clone)]
pub struct FileReport {
    /// Source video.
    pub input: PathBuf,
    /// Its `_web` sibling.
    pub output: PathBuf,
    /// What happened.
    pub outcome: ConversionOutcome,
}

/// Everything that happened during one run, in processing order.
#[derive(Debug, Clone, Default)]
pub struct ConversionReport {
    /// Per-file results.
    pub files: Vec<FileReport>,
}

impl ConversionReport {
    /// Number of files the encoder converted.
    pub fn converted(&self) -> usize {
        self.count(|outcome| matches!(outcome, ConversionOutcome::Converted))
    }

    /// Number of files skipped because their output existed.
    pub fn skipped(&self) -> usize {
        self.count(|outcome| matches!(outcome, ConversionOutcome::Skipped))
    }

    /// Number of files the encoder failed on.
    pub fn failed(&self) -> usize {
        self.count(|outcome| matches!(outcome, ConversionOutcome::Failed(_)))
    }

    /// Number of encoder invocations made (converted + failed).
    pub fn attempted(&self) -> usize {
        self.converted() + self.failed()
    }

    fn count(&self, predicate: impl Fn(&ConversionOutcome) -> bool) -> usize {
        self.files
            .iter()
            .filter(|file| predicate(&file.outcome))
            .count()
    }
}

impl Display for ConversionReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{} converted, {} skipped, {} failed",
            self.converted(),
            self.skipped(),
            self.failed()
        )
    }
}

/// Runs the scan-and-convert loop with a given [`Encoder`].
pub struct BatchConverter<E: Encoder = FfmpegEncoder> {
    encoder: E,
    progress: Arc<dyn ProgressCallback>,
}

impl BatchConverter<FfmpegEncoder> {
    /// Build a converter that runs ffmpeg as configured in `options`.
    pub fn from_options(options: &ConvertOptions) -> Self {
        Self {
            encoder: FfmpegEncoder::with_program(options.encoder_program.clone()),
            progress: Arc::clone(&options.progress),
        }
    }
}

impl<E: Encoder> BatchConverter<E> {
    /// Use `encoder` and report through `progress`.
    pub fn new(encoder: E, progress: Arc<dyn ProgressCallback>) -> Self {
        Self { encoder, progress }
    }

    /// The encoder in use.
    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    /// Convert every video under `input_dir` that has no `_web` output yet.
    ///
    /// # Errors
    ///
    /// Returns [`WebReadyError::Scan`] if `input_dir` cannot be read.
    /// Encoder failures are recorded in the report, not returned.
    pub fn run<P: AsRef<Path>>(&self, input_dir: P) -> Result<ConversionReport, WebReadyError> {
        let videos = without_web_copies(scan_videos(input_dir)?);
        let mut tracker = ProgressTracker::new(self.progress.as_ref(), videos.len() as u64);
        let mut report = ConversionReport {
            files: Vec::with_capacity(videos.len()),
        };

        for input in videos {
            tracker.advance();
            let Some(output) = web_output_path(&input) else {
                // Regular files always have a stem.
                log::warn!("Ignoring {}: no file name", input.display());
                continue;
            };

            let outcome = self.convert_one(&tracker, &input, &output);
            report.files.push(FileReport {
                input,
                output,
                outcome,
            });
        }

        log::info!("Batch finished: {report}");
        Ok(report)
    }

    fn convert_one(
        &self,
        tracker: &ProgressTracker<'_>,
        input: &Path,
        output: &Path,
    ) -> ConversionOutcome {
        if output.exists() {
            log::debug!("{} already exists", output.display());
            tracker.report(ProgressEvent::Skipped, input, output);
            return ConversionOutcome::Skipped;
        }

        tracker.report(ProgressEvent::Converting, input, output);
        match self.encoder.encode(input, output) {
            Ok(()) => {
                tracker.report(ProgressEvent::Converted, input, output);
                ConversionOutcome::Converted
            }
            Err(error) => {
                let error = error.to_string();
                log::debug!("Encoding {} failed: {error}", input.display());
                tracker.report(
                    ProgressEvent::Failed {
                        error: error.clone(),
                    },
                    input,
                    output,
                );
                ConversionOutcome::Failed(error)
            }
        }
    }
}

/// Drop videos that are the `_web` output of another video in the list.
fn without_web_copies(videos: Vec<PathBuf>) -> Vec<PathBuf> {
    let outputs: HashSet<PathBuf> = videos
        .iter()
        .filter_map(|video| web_output_path(video))
        .collect();

    videos
        .into_iter()
        .filter(|video| {
            let is_copy = outputs.contains(video);
            if is_copy {
                log::debug!("{} is a web copy, not an input", video.display());
            }
            !is_copy
        })
        .collect()
}

/// Convert every video under `input_dir` with ffmpeg, printing notices to
/// stdout.
///
/// Equivalent to `BatchConverter::from_options(&ConvertOptions::new()).run(input_dir)`.
///
/// # Errors
///
/// Returns [`WebReadyError::Scan`] if `input_dir` cannot be read.
pub fn convert_for_web_playback<P: AsRef<Path>>(
    input_dir: P,
) -> Result<ConversionReport, WebReadyError> {
    BatchConverter::from_options(&ConvertOptions::new()).run(input_dir)
}
