/// Error types for logsift.
///
/// Two kinds of failure exist and they never mix:
///
/// 1. [`Rejection`]: a candidate log file path failed validation. It is
///    reported to the user and the prompt repeats. It is never returned as an
///    `Err` from the session.
/// 2. [`SiftError`]: an I/O failure once a path has already been accepted
///    (or a failure of the console itself). The session stops and hands the
///    error to the entry point, which prints it and exits non-zero.
///
/// ```rust,ignore
/// match session.run() {
///     Ok(end) => // user chose to exit or input closed,
///     Err(SiftError::ReadLog { path, .. }) => // log file vanished after validation,
///     Err(e) => // any other fatal error
/// }
/// ```
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for fatal operations
pub type SiftResult<T> = Result<T, SiftError>;

/// Fatal errors that end the session
#[derive(Error, Debug)]
pub enum SiftError {
    #[error("Failed to create output directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("Failed to read log file {path}: {source}")]
    ReadLog { path: PathBuf, source: io::Error },
    #[error("Failed to write output file {path}: {source}")]
    WriteOutput { path: PathBuf, source: io::Error },
    #[error("Console error: {0}")]
    Console(#[from] io::Error),
}

impl SiftError {
    pub fn create_dir(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::CreateDir {
            path: path.into(),
            source,
        }
    }

    pub fn read_log(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::ReadLog {
            path: path.into(),
            source,
        }
    }

    pub fn write_output(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::WriteOutput {
            path: path.into(),
            source,
        }
    }
}

/// Reasons a log file path is rejected, in the order they are reported
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    #[error("The file or directory does not exist.")]
    NotFound,
    #[error("The file does not have a .log extension.")]
    WrongExtension,
    #[error("The file is not UTF-8 encoded.")]
    NotUtf8,
    #[error("The file is invalid.")]
    Invalid,
}
