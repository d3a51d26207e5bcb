//! Error types for the `webready` crate.
//!
//! [`WebReadyError`] is returned by every fallible operation. Only
//! [`WebReadyError::Scan`] ends a batch early; encoder errors are caught
//! per file by [`BatchConverter`](crate::BatchConverter) and reported.

use std::{io::Error as IoError, path::PathBuf, process::ExitStatus};

use thiserror::Error;

/// The unified error type for all `webready` operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WebReadyError {
    /// The root directory could not be enumerated.
    #[error("Failed to scan {path}: {source}")]
    Scan {
        /// Directory passed to the scan.
        path: PathBuf,
        /// Underlying traversal error.
        #[source]
        source: walkdir::Error,
    },

    /// The encoder process could not be started (usually: not installed).
    #[error("Failed to start encoder `{program}`: {source}")]
    EncoderSpawn {
        /// Program that was executed.
        program: String,
        /// Underlying OS error.
        #[source]
        source: IoError,
    },

    /// The encoder ran but exited unsuccessfully.
    #[error("Command `{program}` failed on {input}: {status}")]
    EncoderFailed {
        /// Program that was executed.
        program: String,
        /// Input file handed to the encoder.
        input: PathBuf,
        /// Exit status reported by the OS.
        status: ExitStatus,
    },
}
