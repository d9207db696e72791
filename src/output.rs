//! Writing rendered schemas to disk.
//!
//! Kept out of the schema engine: the engine returns text, this module decides
//! where it goes.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::OutputError;

/// Use `requested` unless it is absent or empty, otherwise `default`.
pub fn resolve_output_path(requested: Option<&Path>, default: &str) -> PathBuf {
    match requested {
        Some(path) if !path.as_os_str().is_empty() => path.to_path_buf(),
        _ => PathBuf::from(default),
    }
}

/// Write `content` to `path`, creating parent directories as needed.
pub fn write_schema(path: &Path, content: &str) -> Result<(), OutputError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| OutputError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, content).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), bytes = content.len(), "wrote schema");
    Ok(())
}

/// Read a schema file.
pub fn read_schema(path: &Path) -> Result<String, OutputError> {
    fs::read_to_string(path).map_err(|source| OutputError::Read {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_output_path() {
        assert_eq!(
            resolve_output_path(None, "schemas/out.avsc"),
            PathBuf::from("schemas/out.avsc")
        );
        assert_eq!(
            resolve_output_path(Some(Path::new("")), "schemas/out.avsc"),
            PathBuf::from("schemas/out.avsc")
        );
        assert_eq!(
            resolve_output_path(Some(Path::new("custom.avsc")), "schemas/out.avsc"),
            PathBuf::from("custom.avsc")
        );
    }

    #[test]
    fn test_write_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/error-message.avsc");
        write_schema(&path, "{}").unwrap();
        assert_eq!(read_schema(&path).unwrap(), "{}");
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_schema(&dir.path().join("absent.avsc")).unwrap_err();
        assert!(matches!(err, OutputError::Read { .. }));
    }
}
