//! File system utilities.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Writes content to a file atomically using a temp file and rename.
///
/// The temp file sits next to the target so the rename stays on one
/// filesystem. A crash mid-write leaves the previous config intact.
pub fn atomic_write(path: &Path, content: &str) -> Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = path.file_name().unwrap_or_default().to_string_lossy();
    let temp_path = parent.join(format!(".{file_name}.tmp"));

    fs::write(&temp_path, content)
        .with_context(|| format!("Failed to write temp file: {}", temp_path.display()))?;

    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to replace file: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write_overwrites_existing() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("config.json");

        fs::write(&file_path, "{}").unwrap();
        atomic_write(&file_path, r#"{"api_id": 1}"#).unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), r#"{"api_id": 1}"#);
        assert!(!temp_dir.path().join(".config.json.tmp").exists());
    }

    #[test]
    fn test_atomic_write_missing_dir_fails() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("missing").join("config.json");

        let err = atomic_write(&file_path, "{}").unwrap_err();
        assert!(err.to_string().contains("Failed to write temp file"));
    }
}
