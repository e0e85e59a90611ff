//! Output directory layout.

use derive_getters::Getters;
use maas_error::{BatchError, BatchErrorKind, IoError, MaasResult};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Sub-directory holding full responses.
pub const RAW_DIR: &str = "raw_responses";
/// Sub-directory holding extracted text.
pub const GENERATED_DIR: &str = "generated_texts";
/// Manifest file name.
pub const MANIFEST_FILE: &str = "files_found.txt";

/// Resolved input and output locations for one run.
///
/// Output files mirror each input's path relative to the input directory.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct BatchLayout {
    input_dir: PathBuf,
    output_dir: PathBuf,
    raw_dir: PathBuf,
    generated_dir: PathBuf,
}

impl BatchLayout {
    /// Checks the input directory and creates the output skeleton.
    ///
    /// # Errors
    ///
    /// Fails if the input directory does not exist or the output
    /// directories cannot be created.
    pub fn prepare(input_dir: &Path, output_dir: &Path) -> MaasResult<Self> {
        if !input_dir.is_dir() {
            return Err(
                BatchError::new(BatchErrorKind::InputDirMissing(input_dir.to_path_buf())).into(),
            );
        }
        let input_dir = input_dir
            .canonicalize()
            .map_err(|e| IoError::new(input_dir, &e))?;

        std::fs::create_dir_all(output_dir).map_err(|e| IoError::new(output_dir, &e))?;
        let output_dir = output_dir
            .canonicalize()
            .map_err(|e| IoError::new(output_dir, &e))?;

        let raw_dir = output_dir.join(RAW_DIR);
        let generated_dir = output_dir.join(GENERATED_DIR);
        for dir in [&raw_dir, &generated_dir] {
            std::fs::create_dir_all(dir).map_err(|e| IoError::new(dir, &e))?;
        }

        debug!(
            input = %input_dir.display(),
            output = %output_dir.display(),
            "Prepared output layout"
        );

        Ok(Self {
            input_dir,
            output_dir,
            raw_dir,
            generated_dir,
        })
    }

    /// Path of the manifest.
    pub fn manifest_path(&self) -> PathBuf {
        self.output_dir.join(MANIFEST_FILE)
    }

    /// Path of worker `worker`'s log. Worker ids start at 1.
    pub fn log_path(&self, worker: usize) -> PathBuf {
        self.output_dir.join(format!("processing_log.{worker}.txt"))
    }

    /// Where the full response for `relative` is written.
    pub fn raw_path(&self, relative: &Path) -> PathBuf {
        mirrored(&self.raw_dir, relative, "txt")
    }

    /// Where the extracted text for `relative` is written.
    pub fn generated_path(&self, relative: &Path) -> PathBuf {
        mirrored(&self.generated_dir, relative, "json")
    }
}

fn mirrored(root: &Path, relative: &Path, extension: &str) -> PathBuf {
    let stem = relative
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let parent = relative.parent().unwrap_or_else(|| Path::new(""));
    root.join(parent).join(format!("{stem}.{extension}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirrored_paths_keep_structure() {
        let root = Path::new("/out/raw_responses");
        assert_eq!(
            mirrored(root, Path::new("src/lib.rs"), "txt"),
            PathBuf::from("/out/raw_responses/src/lib.txt")
        );
        assert_eq!(
            mirrored(root, Path::new("main.rs"), "json"),
            PathBuf::from("/out/raw_responses/main.json")
        );
    }

    #[test]
    fn test_missing_input_dir() {
        let out = tempfile::tempdir().expect("Temp dir");
        let err = BatchLayout::prepare(Path::new("/no/such/input"), out.path())
            .expect_err("Missing input");
        assert!(err.to_string().contains("Input directory not found"));
    }
}
