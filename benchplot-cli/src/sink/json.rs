//! JSON file sink

use benchplot_report::generate_json_report;
use std::path::Path;
use thiserror::Error;

/// Errors from writing the JSON export
#[derive(Debug, Error)]
pub enum SinkError {
    /// The document could not be serialized
    #[error("Failed to serialize results: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The file or its parent directory could not be written
    #[error("Failed to write {path}: {source}")]
    Write {
        /// Target path
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Write a pretty-printed JSON document, creating parent directories.
pub fn write_json_file(path: &Path, value: &serde_json::Value) -> Result<(), SinkError> {
    let json = generate_json_report(value)?;
    let write_err = |source: std::io::Error| SinkError::Write {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    std::fs::write(path, json).map_err(write_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/out/results.json");

        let value = serde_json::json!({ "meta": {}, "runs": [] });
        write_json_file(&path, &value).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, value);
    }

    #[test]
    fn test_write_into_file_path_fails() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let err = write_json_file(&blocker.join("results.json"), &serde_json::json!({}))
            .unwrap_err();
        assert!(matches!(err, SinkError::Write { .. }));
    }
}
