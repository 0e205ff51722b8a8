//! File access for document-backed configurations

use crate::{error::ConfigError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Resolve `path` to an absolute path and read it
///
/// Fails with `FileNotFound` when the path is missing or is not a regular file.
pub fn read_document<P: AsRef<Path>>(path: P) -> Result<(PathBuf, String)> {
    let path = path.as_ref();

    if !path.is_file() {
        return Err(ConfigError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let resolved = fs::canonicalize(path).map_err(|e| ConfigError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let content = fs::read_to_string(&resolved).map_err(|e| ConfigError::IoError {
        path: resolved.clone(),
        source: e,
    })?;

    Ok((resolved, content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file() {
        let err = read_document("nonexistent.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn test_directory_is_not_a_document() {
        let dir = TempDir::new().unwrap();
        let err = read_document(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn test_reads_and_resolves() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("app.yaml");
        fs::write(&file, "a: 1\n").unwrap();

        let (resolved, content) = read_document(&file).unwrap();
        assert!(resolved.is_absolute());
        assert_eq!(content, "a: 1\n");
    }
}
