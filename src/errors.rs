//! Fatal error taxonomy for the harness.
//!
//! Per-test mismatches are report content, never errors; everything in this
//! module aborts the whole run before or during the suite, with no partial
//! report.

use std::io;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Process exit code for configuration misuse.
const EXIT_CONFIG: i32 = 10;
/// Process exit code for artifact or report i/o failures.
const EXIT_IO: i32 = 11;
/// Process exit code for a missing or non-directory test root.
const EXIT_BAD_DIRECTORY: i32 = 41;

#[derive(Debug, Error, Diagnostic)]
pub enum HarnessError {
    #[error("test directory '{}' does not exist or is not a directory", .path.display())]
    #[diagnostic(
        code(harness::invalid_directory),
        help("point --directory at an existing directory of test families")
    )]
    InvalidDirectory { path: PathBuf },

    #[error("conflicting harness configuration: {detail}")]
    #[diagnostic(
        code(harness::conflicting_mode),
        help("pick at most one of --parse-only / --int-only, and only the script that stage runs")
    )]
    ConflictingMode { detail: String },

    #[error("i/o failure on '{}'", .path.display())]
    #[diagnostic(code(harness::io))]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl HarnessError {
    /// Exit code the process reports when this error aborts a run.
    pub fn exit_code(&self) -> i32 {
        match self {
            HarnessError::InvalidDirectory { .. } => EXIT_BAD_DIRECTORY,
            HarnessError::ConflictingMode { .. } => EXIT_CONFIG,
            HarnessError::Io { .. } => EXIT_IO,
        }
    }
}
