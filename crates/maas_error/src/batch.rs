//! Batch driver error types.

use std::path::PathBuf;

/// Conditions that abort a whole batch run.
///
/// Per-file failures are never represented here; they are recorded as
/// `ERROR` entries in the worker log instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum BatchErrorKind {
    /// Input directory does not exist or is not a directory
    #[display("Input directory not found: {}", _0.display())]
    InputDirMissing(PathBuf),
    /// Glob pattern could not be compiled
    #[display("Invalid file pattern: {}", _0)]
    InvalidPattern(String),
    /// Worker count outside the accepted range
    #[display("Invalid worker count: {} (must be at least 1)", _0)]
    InvalidWorkerCount(usize),
    /// Discovery or output setup stopped before completing
    #[display("Batch preparation failed: {}", _0)]
    PrepareFailed(String),
    /// A worker task stopped before finishing its items
    #[display("Worker failed: {}", _0)]
    WorkerFailed(String),
}

/// Batch error with location tracking.
///
/// # Examples
///
/// ```
/// use maas_error::{BatchError, BatchErrorKind};
///
/// let err = BatchError::new(BatchErrorKind::InvalidWorkerCount(0));
/// assert!(err.to_string().contains("at least 1"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Batch Error: {} at line {} in {}", kind, line, file)]
pub struct BatchError {
    /// The kind of error that occurred
    pub kind: BatchErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl BatchError {
    /// Create a new batch error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: BatchErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
