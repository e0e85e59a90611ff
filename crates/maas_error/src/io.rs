//! Filesystem error types.

use std::path::{Path, PathBuf};

/// I/O failure tied to the path that caused it.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("I/O Error: {} ({}) at line {} in {}", message, path.display(), line, file)]
pub struct IoError {
    /// Error message
    pub message: String,
    /// Path being read or written
    pub path: PathBuf,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl IoError {
    /// Create a new IoError for `path` at the current location.
    #[track_caller]
    pub fn new(path: impl AsRef<Path>, err: &std::io::Error) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: err.to_string(),
            path: path.as_ref().to_path_buf(),
            line: location.line(),
            file: location.file(),
        }
    }
}
