//! Input discovery and the manifest.

use derive_getters::Getters;
use maas_error::{BatchError, BatchErrorKind, IoError, MaasResult};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// One discovered input file.
///
/// Created during the directory scan and consumed by exactly one worker.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct BatchItem {
    /// Absolute path of the file
    path: PathBuf,
    /// Path relative to the input directory; mirrored in the output tree
    relative: PathBuf,
}

impl BatchItem {
    /// Creates an item for `path` found under `input_dir`.
    ///
    /// Returns `None` when `path` is not inside `input_dir`.
    pub fn new(input_dir: &Path, path: PathBuf) -> Option<Self> {
        let relative = path.strip_prefix(input_dir).ok()?.to_path_buf();
        Some(Self { path, relative })
    }
}

/// Finds the regular files under `input_dir` matching `pattern`.
///
/// The pattern uses glob syntax relative to `input_dir`; `**` matches any
/// number of directories. Results are sorted by path.
///
/// # Errors
///
/// Returns a batch error when the pattern is absolute, escapes the input
/// directory, or does not compile.
pub fn discover(input_dir: &Path, pattern: &str) -> MaasResult<Vec<BatchItem>> {
    let trimmed = pattern.trim();
    if trimmed.is_empty()
        || Path::new(trimmed).is_absolute()
        || Path::new(trimmed)
            .components()
            .any(|c| matches!(c, std::path::Component::ParentDir))
    {
        return Err(BatchError::new(BatchErrorKind::InvalidPattern(format!(
            "{pattern:?} must be a non-empty pattern relative to the input directory"
        )))
        .into());
    }

    let base = glob::Pattern::escape(&input_dir.to_string_lossy());
    let full = format!("{base}/{trimmed}");
    let entries = glob::glob(&full).map_err(|e| {
        BatchError::new(BatchErrorKind::InvalidPattern(format!("{pattern}: {e}")))
    })?;

    let mut items = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => match BatchItem::new(input_dir, path) {
                Some(item) => items.push(item),
                None => warn!(pattern, "Match outside the input directory skipped"),
            },
            Ok(_) => {}
            Err(e) => warn!(path = %e.path().display(), error = %e, "Unreadable path skipped"),
        }
    }
    items.sort();
    items.dedup();

    debug!(count = items.len(), pattern, "Discovered input files");
    Ok(items)
}

/// Writes one absolute path per line for every discovered item.
pub fn write_manifest(path: &Path, items: &[BatchItem]) -> MaasResult<()> {
    let file = std::fs::File::create(path).map_err(|e| IoError::new(path, &e))?;
    let mut writer = std::io::BufWriter::new(file);
    for item in items {
        writeln!(writer, "{}", item.path.display()).map_err(|e| IoError::new(path, &e))?;
    }
    writer.flush().map_err(|e| IoError::new(path, &e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(root: &Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().expect("Parent")).expect("Create dirs");
        std::fs::write(path, contents).expect("Write file");
    }

    #[test]
    fn test_recursive_pattern_includes_top_level() {
        let dir = tempfile::tempdir().expect("Temp dir");
        let root = dir.path().canonicalize().expect("Canonical");
        touch(&root, "a.rs", "fn a() {}");
        touch(&root, "nested/deeper/b.rs", "fn b() {}");
        touch(&root, "nested/notes.txt", "not rust");

        let items = discover(&root, "**/*.rs").expect("Valid pattern");
        let relative: Vec<_> = items.iter().map(|i| i.relative().clone()).collect();
        assert_eq!(
            relative,
            vec![PathBuf::from("a.rs"), PathBuf::from("nested/deeper/b.rs")]
        );
        assert!(items.iter().all(|i| i.path().is_absolute()));
    }

    #[test]
    fn test_directories_are_not_items() {
        let dir = tempfile::tempdir().expect("Temp dir");
        let root = dir.path().canonicalize().expect("Canonical");
        std::fs::create_dir_all(root.join("looks_like.rs")).expect("Create dir");
        touch(&root, "real.rs", "");

        let items = discover(&root, "*.rs").expect("Valid pattern");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].relative(), &PathBuf::from("real.rs"));
    }

    #[test]
    fn test_rejects_escaping_patterns() {
        let dir = tempfile::tempdir().expect("Temp dir");
        assert!(discover(dir.path(), "/etc/*").is_err());
        assert!(discover(dir.path(), "../*.rs").is_err());
        assert!(discover(dir.path(), "  ").is_err());
    }

    #[test]
    fn test_rejects_malformed_glob() {
        let dir = tempfile::tempdir().expect("Temp dir");
        let err = discover(dir.path(), "[*.rs").expect_err("Unclosed bracket");
        assert!(err.to_string().contains("Invalid file pattern"));
    }
}
