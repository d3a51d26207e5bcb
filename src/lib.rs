//! # webready
//!
//! Batch re-encode a directory of videos into files every mainstream
//! browser can play, by running `ffmpeg` on each one.
//!
//! Each video found under a directory gets a sibling named
//! `<stem>_web<ext>`, encoded as H.264 baseline / yuv420p with AAC audio
//! and the `+faststart` flag. Files whose `_web` sibling already exists are
//! skipped, so running the tool again only picks up new videos.
//!
//! ## Quick Start
//!
//! ```no_run
//! let report = webready::convert_for_web_playback("videos")?;
//! println!("{report}");
//! # Ok::<(), webready::WebReadyError>(())
//! ```
//!
//! ### Custom reporting
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use webready::{BatchConverter, ConvertOptions, ProgressCallback, ProgressInfo};
//!
//! struct Counter;
//!
//! impl ProgressCallback for Counter {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         println!("[{}/{}] {:?}", info.current, info.total, info.event);
//!     }
//! }
//!
//! let options = ConvertOptions::new().with_progress(Arc::new(Counter));
//! BatchConverter::from_options(&options).run(".")?;
//! # Ok::<(), webready::WebReadyError>(())
//! ```
//!
//! ## Requirements
//!
//! An `ffmpeg` executable built with `libx264` and the native `aac`
//! encoder must be on `PATH`, or configured with
//! [`ConvertOptions::with_encoder_program`].

pub mod config;
pub mod convert;
pub mod encoder;
pub mod error;
pub mod naming;
pub mod progress;
pub mod scan;

pub use config::ConvertOptions;
pub use convert::{
    BatchConverter, ConversionOutcome, ConversionReport, FileReport, convert_for_web_playback,
};
pub use encoder::{DEFAULT_FFMPEG_PROGRAM, Encoder, FfmpegEncoder};
pub use error::WebReadyError;
pub use naming::{WEB_SUFFIX, web_output_path};
pub use progress::{ConsoleReporter, ProgressCallback, ProgressEvent, ProgressInfo};
pub use scan::{VIDEO_EXTENSIONS, is_video_file, scan_videos};
