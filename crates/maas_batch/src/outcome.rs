//! Per-item outcome tags and log lines.

use derive_getters::Getters;
use std::path::PathBuf;

/// Classification of one processed file.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    /// Non-empty text was generated
    Processed,
    /// The file had no content to send
    Empty,
    /// The remote call or file I/O failed
    Error,
    /// The call succeeded but produced no text
    GenNone,
}

/// Result of processing one item, as recorded in a worker log.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct ItemRecord {
    /// Path relative to the input directory
    relative: PathBuf,
    /// Worker that processed the item
    worker: usize,
    /// Classification
    outcome: Outcome,
    /// Error message or other detail
    detail: Option<String>,
}

impl ItemRecord {
    /// Creates a record.
    pub fn new(relative: PathBuf, worker: usize, outcome: Outcome, detail: Option<String>) -> Self {
        Self {
            relative,
            worker,
            outcome,
            detail,
        }
    }

    /// Renders the log line, without the trailing newline.
    ///
    /// Errors carry their message after a colon; other tags are bare.
    ///
    /// # Examples
    ///
    /// ```
    /// use maas_batch::{ItemRecord, Outcome};
    /// use std::path::PathBuf;
    ///
    /// let ok = ItemRecord::new(PathBuf::from("src/lib.rs"), 1, Outcome::Processed, None);
    /// assert_eq!(ok.log_line(), "[PROCESSED] src/lib.rs");
    ///
    /// let failed = ItemRecord::new(PathBuf::from("a.rs"), 2, Outcome::Error, Some("boom".into()));
    /// assert_eq!(failed.log_line(), "[ERROR] a.rs: boom");
    /// ```
    pub fn log_line(&self) -> String {
        match (&self.outcome, &self.detail) {
            (Outcome::Error, Some(detail)) => {
                let detail = detail.replace('\n', " ");
                format!("[{}] {}: {}", self.outcome, self.relative.display(), detail)
            }
            _ => format!("[{}] {}", self.outcome, self.relative.display()),
        }
    }
}

/// Splits a worker log line into its tag and the remainder.
///
/// Returns `None` for lines that do not start with a known tag.
pub fn parse_log_line(line: &str) -> Option<(Outcome, &str)> {
    let rest = line.strip_prefix('[')?;
    let (tag, remainder) = rest.split_once("] ")?;
    let outcome = tag.parse().ok()?;
    Some((outcome, remainder))
}
