//! Batch run options.

use derive_getters::Getters;
use std::path::{Path, PathBuf};

/// Glob used when no pattern is given.
pub const DEFAULT_PATTERN: &str = "**/*.rs";
/// Worker count used when none is given.
pub const DEFAULT_WORKERS: usize = 1;

/// What to process and how wide to fan out.
///
/// # Examples
///
/// ```
/// use maas_batch::BatchOptions;
///
/// let options = BatchOptions::builder()
///     .input_dir("src")
///     .output_dir("out")
///     .workers(4usize)
///     .build()
///     .expect("valid options");
/// assert_eq!(options.pattern(), "**/*.rs");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct BatchOptions {
    /// Directory scanned for input files
    input_dir: PathBuf,
    /// Directory receiving the manifest, logs and outputs
    output_dir: PathBuf,
    /// Glob pattern relative to `input_dir`
    #[builder(default = "DEFAULT_PATTERN.to_string()")]
    pattern: String,
    /// Maximum number of concurrent workers
    #[builder(default = "DEFAULT_WORKERS")]
    workers: usize,
}

impl BatchOptions {
    /// Creates a new builder for BatchOptions.
    pub fn builder() -> BatchOptionsBuilder {
        BatchOptionsBuilder::default()
    }

    /// Options with the default pattern and a single worker.
    pub fn new(input_dir: impl AsRef<Path>, output_dir: impl AsRef<Path>) -> Self {
        Self {
            input_dir: input_dir.as_ref().to_path_buf(),
            output_dir: output_dir.as_ref().to_path_buf(),
            pattern: DEFAULT_PATTERN.to_string(),
            workers: DEFAULT_WORKERS,
        }
    }

    /// Replaces the glob pattern.
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// Replaces the worker count.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }
}
