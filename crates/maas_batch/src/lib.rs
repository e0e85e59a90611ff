//! Batch processing of a directory tree through a hosted model.
//!
//! A run discovers the files matching a glob pattern, records them in a
//! manifest, splits them into a fixed plan of per-worker task lists and
//! sends each file's content to the model. Every file ends up with exactly
//! one outcome tag in its worker's log:
//!
//! | tag | meaning |
//! |---|---|
//! | `PROCESSED` | the model returned non-empty text |
//! | `EMPTY` | the file had nothing to send |
//! | `ERROR` | the call or file I/O failed |
//! | `GEN_NONE` | the call returned no usable text |
//!
//! Output layout under the output directory:
//!
//! ```text
//! files_found.txt                 manifest of discovered files
//! processing_log.{N}.txt          one log per worker
//! raw_responses/<rel>/<stem>.txt  full response
//! generated_texts/<rel>/<stem>.json  extracted text
//! ```

mod discovery;
mod layout;
mod options;
mod outcome;
mod pool;
mod report;
mod runner;
mod worker;

pub use discovery::{BatchItem, discover, write_manifest};
pub use layout::{BatchLayout, GENERATED_DIR, MANIFEST_FILE, RAW_DIR};
pub use options::{BatchOptions, BatchOptionsBuilder, DEFAULT_PATTERN, DEFAULT_WORKERS};
pub use outcome::{ItemRecord, Outcome, parse_log_line};
pub use pool::{WorkerPool, partition};
pub use report::BatchReport;
pub use runner::{BatchPlan, BatchRunner, run_batch};
