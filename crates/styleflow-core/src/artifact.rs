//! Artifact materialization.
//!
//! Persists final stylesheet text to a uniquely named file and builds the
//! synthetic import statement the host bundler resolves next. Persisted
//! artifacts are deliberately not tracked or deleted here: once `keep()`
//! hands the file over, its lifetime belongs to the artifact directory's
//! lifecycle (the host's build run or process exit).

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// A persisted stylesheet artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Unique path of the persisted file.
    pub path: PathBuf,
}

impl Artifact {
    /// The synthetic import statement referencing this artifact.
    ///
    /// The path is JSON-encoded, so it is always safe inside a quoted
    /// string literal regardless of what characters the path contains.
    pub fn import_statement(&self) -> Result<String> {
        let quoted = serde_json::to_string(&self.path.to_string_lossy())?;
        Ok(format!("import {quoted};"))
    }
}

/// Writes final stylesheet text to uniquely named artifact files.
#[derive(Debug, Default)]
pub struct Materializer {
    /// Target directory; the OS temp dir when unset.
    dir: Option<PathBuf>,
}

impl Materializer {
    #[must_use]
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self { dir }
    }

    /// Persist `final_text` to a fresh artifact named
    /// `{stem}.{content-hash8}.{random}.css`.
    pub fn materialize(&self, final_text: &str, source_path: &Path) -> Result<Artifact> {
        let dir = self
            .dir
            .clone()
            .unwrap_or_else(std::env::temp_dir);
        let stem = styleflow_util::fs::file_stem_or(source_path, "style");
        let hash = styleflow_util::hash::short_hash(final_text.as_bytes());
        let prefix = format!("{stem}.{hash}.");

        let mut file = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(".css")
            .tempfile_in(&dir)
            .map_err(|source| Error::WriteFailure {
                path: dir.clone(),
                source,
            })?;

        file.write_all(final_text.as_bytes())
            .map_err(|source| Error::WriteFailure {
                path: file.path().to_path_buf(),
                source,
            })?;

        let (_, path) = file.keep().map_err(|e| Error::WriteFailure {
            path: dir,
            source: e.error,
        })?;

        tracing::debug!(artifact = %path.display(), source = %source_path.display(), "persisted artifact");
        Ok(Artifact { path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_materialize_writes_exact_content() {
        let dir = tempdir().unwrap();
        let materializer = Materializer::new(Some(dir.path().to_path_buf()));

        let artifact = materializer
            .materialize(".x{color:red}", Path::new("/src/a.css"))
            .unwrap();

        assert_eq!(std::fs::read_to_string(&artifact.path).unwrap(), ".x{color:red}");
        assert_eq!(artifact.path.extension().unwrap(), "css");
    }

    #[test]
    fn test_materialize_allocates_fresh_paths() {
        let dir = tempdir().unwrap();
        let materializer = Materializer::new(Some(dir.path().to_path_buf()));

        let a = materializer.materialize("a{}", Path::new("/src/a.css")).unwrap();
        let b = materializer.materialize("a{}", Path::new("/src/a.css")).unwrap();
        assert_ne!(a.path, b.path);
    }

    #[test]
    fn test_artifact_outlives_materializer() {
        let dir = tempdir().unwrap();
        let path = {
            let materializer = Materializer::new(Some(dir.path().to_path_buf()));
            materializer
                .materialize("a{}", Path::new("/src/a.css"))
                .unwrap()
                .path
        };
        assert!(path.is_file());
    }

    #[test]
    fn test_import_statement_is_quoted_and_escaped() {
        let artifact = Artifact {
            path: PathBuf::from("/tmp/odd \"name\".css"),
        };
        let statement = artifact.import_statement().unwrap();
        assert!(statement.starts_with("import \""));
        assert!(statement.ends_with("\";"));
        assert!(statement.contains("\\\""));
    }

    #[test]
    fn test_missing_directory_is_write_failure() {
        let materializer = Materializer::new(Some(PathBuf::from("/nonexistent/dir")));
        let err = materializer
            .materialize("a{}", Path::new("/src/a.css"))
            .unwrap_err();
        assert!(matches!(err, Error::WriteFailure { .. }));
    }
}
