//! Batch configuration.
//!
//! [`ConvertOptions`] carries the few knobs a run has: which encoder
//! executable to start and where progress notices go. The encoding recipe
//! itself is fixed and cannot be set here.
//!
//! # Example
//!
//! ```no_run
//! use webready::{BatchConverter, ConvertOptions};
//!
//! let options = ConvertOptions::new().with_encoder_program("/usr/local/bin/ffmpeg");
//! let report = BatchConverter::from_options(&options).run(".")?;
//! println!("{report}");
//! # Ok::<(), webready::WebReadyError>(())
//! ```

use std::ffi::OsString;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use crate::encoder::DEFAULT_FFMPEG_PROGRAM;
use crate::progress::{ConsoleReporter, ProgressCallback};

/// Options for a conversion batch.
#[derive(Clone)]
pub struct ConvertOptions {
    pub(crate) encoder_program: OsString,
    pub(crate) progress: Arc<dyn ProgressCallback>,
}

impl Debug for ConvertOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ConvertOptions")
            .field("encoder_program", &self.encoder_program)
            .finish_non_exhaustive()
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ConvertOptions {
    /// Defaults: `ffmpeg` from `PATH`, notices printed by [`ConsoleReporter`].
    pub fn new() -> Self {
        Self {
            encoder_program: OsString::from(DEFAULT_FFMPEG_PROGRAM),
            progress: Arc::new(ConsoleReporter),
        }
    }

    /// Run a different encoder executable.
    #[must_use]
    pub fn with_encoder_program<S: Into<OsString>>(mut self, program: S) -> Self {
        self.encoder_program = program.into();
        self
    }

    /// Send notices to `callback` instead of stdout.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = callback;
        self
    }
}
