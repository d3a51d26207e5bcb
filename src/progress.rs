//! Per-file progress notices.
//!
//! The batch loop announces every step through a [`ProgressCallback`]:
//! a file is skipped, a conversion starts, a conversion succeeds, or it
//! fails. [`ConsoleReporter`], the default, prints one line per notice to
//! stdout.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use webready::{BatchConverter, ConvertOptions, ProgressCallback, ProgressEvent, ProgressInfo};
//!
//! struct FailuresOnly;
//!
//! impl ProgressCallback for FailuresOnly {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         if let ProgressEvent::Failed { error } = &info.event {
//!             eprintln!("{}: {error}", info.input.display());
//!         }
//!     }
//! }
//!
//! let options = ConvertOptions::new().with_progress(Arc::new(FailuresOnly));
//! BatchConverter::from_options(&options).run("videos")?;
//! # Ok::<(), webready::WebReadyError>(())
//! ```

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// What just happened to a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// The output already exists; nothing was run.
    Skipped,
    /// The encoder is about to be started.
    Converting,
    /// The encoder exited successfully.
    Converted,
    /// The encoder could not be started or exited unsuccessfully.
    Failed {
        /// Rendered error, including the underlying cause.
        error: String,
    },
}

/// A snapshot delivered to [`ProgressCallback::on_progress`].
#[derive(Debug, Clone)]
pub struct ProgressInfo {
    /// The notice being reported.
    pub event: ProgressEvent,
    /// Source file.
    pub input: PathBuf,
    /// Computed `_web` output path.
    pub output: PathBuf,
    /// 1-based position of this file in the batch.
    pub current: u64,
    /// Number of video files found by the scan.
    pub total: u64,
    /// Wall-clock time since the batch started.
    pub elapsed: Duration,
}

/// Receives notices from a running batch.
///
/// Callbacks observe the run; they cannot stop it.
pub trait ProgressCallback: Send + Sync {
    /// Called once per notice, in order.
    fn on_progress(&self, info: &ProgressInfo);
}

/// Prints the classic one-line notices to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    /// Format the line printed for `info`.
    pub fn line(info: &ProgressInfo) -> String {
        let input = info.input.display();
        match &info.event {
            ProgressEvent::Skipped => format!("Skipping {input} (already converted)"),
            ProgressEvent::Converting => format!("Converting {input} for web playback..."),
            ProgressEvent::Converted => format!(
                "Successfully converted {input} to web-compatible format: {}",
                info.output.display()
            ),
            ProgressEvent::Failed { error } => format!("Error converting {input}: {error}"),
        }
    }
}

impl ProgressCallback for ConsoleReporter {
    fn on_progress(&self, info: &ProgressInfo) {
        println!("{}", Self::line(info));
    }
}

/// Tracks batch position and timing, and emits callbacks.
pub(crate) struct ProgressTracker<'a> {
    callback: &'a dyn ProgressCallback,
    total: u64,
    current: u64,
    start_time: Instant,
}

impl<'a> ProgressTracker<'a> {
    pub(crate) fn new(callback: &'a dyn ProgressCallback, total: u64) -> Self {
        Self {
            callback,
            total,
            current: 0,
            start_time: Instant::now(),
        }
    }

    /// Move on to the next file.
    pub(crate) fn advance(&mut self) {
        self.current += 1;
    }

    pub(crate) fn report(&self, event: ProgressEvent, input: &Path, output: &Path) {
        let info = ProgressInfo {
            event,
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            current: self.current,
            total: self.total,
            elapsed: self.start_time.elapsed(),
        };
        self.callback.on_progress(&info);
    }
}
