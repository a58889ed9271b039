//! Workspace path utilities.
//!
//! Everything the process reads or writes (config and log) lives
//! in one workspace directory, chosen on the command line or defaulting to
//! the current directory.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Name of the JSON config document.
pub const CONFIG_FILE: &str = "config.json";

/// Name of the log file.
pub const LOG_FILE: &str = "log.txt";

/// The directory holding the config and log files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolves the workspace from an optional CLI argument.
    ///
    /// Resolution order:
    /// 1. the given directory
    /// 2. the current working directory
    pub fn resolve(dir: Option<&Path>) -> Result<Self> {
        match dir {
            Some(dir) => Ok(Self::new(dir)),
            None => std::env::current_dir()
                .map(Self::new)
                .context("Failed to determine current directory"),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_explicit_dir() {
        let workspace = Workspace::resolve(Some(Path::new("/srv/teletrans"))).unwrap();
        assert_eq!(workspace.root(), Path::new("/srv/teletrans"));
        assert_eq!(
            workspace.config_path(),
            PathBuf::from("/srv/teletrans/config.json")
        );
    }

    #[test]
    fn test_resolve_defaults_to_current_dir() {
        let workspace = Workspace::resolve(None).unwrap();
        assert_eq!(workspace.root(), std::env::current_dir().unwrap());
    }
}
