//! File system paths.

use crate::{CoreError, CoreResult};
use std::path::PathBuf;

/// Manages file system paths for the template tools.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Base directory (~/.template)
    base_dir: PathBuf,
}

impl Paths {
    /// Create a new Paths instance rooted at `~/.template`.
    pub fn new() -> CoreResult<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| CoreError::Path("Could not determine home directory".to_string()))?;

        Ok(Self {
            base_dir: home.join(".template"),
        })
    }

    /// Create a new Paths instance with a custom base directory.
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Config file path (~/.template/config.json).
    pub fn config_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Log directory (~/.template/logs).
    pub fn logs_dir(&self) -> PathBuf {
        self.base_dir.join("logs")
    }

    /// Central JSONL log file (~/.template/logs/dev.jsonl).
    pub fn log_file(&self) -> PathBuf {
        self.logs_dir().join("dev.jsonl")
    }

    /// File-backed secret store used by the CLI (~/.template/session.json).
    pub fn session_file(&self) -> PathBuf {
        self.base_dir.join("session.json")
    }

    /// Ensure the base and log directories exist.
    pub fn ensure_dirs(&self) -> CoreResult<()> {
        std::fs::create_dir_all(&self.base_dir)?;
        std::fs::create_dir_all(self.logs_dir())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_paths_layout() {
        let paths = Paths::with_base_dir(PathBuf::from("/tmp/template-test"));
        assert_eq!(
            paths.config_file(),
            PathBuf::from("/tmp/template-test/config.json")
        );
        assert_eq!(
            paths.log_file(),
            PathBuf::from("/tmp/template-test/logs/dev.jsonl")
        );
        assert_eq!(
            paths.session_file(),
            PathBuf::from("/tmp/template-test/session.json")
        );
    }

    #[test]
    fn test_ensure_dirs_creates_tree() {
        let dir = tempdir().unwrap();
        let paths = Paths::with_base_dir(dir.path().join("base"));
        paths.ensure_dirs().unwrap();
        assert!(paths.base_dir().is_dir());
        assert!(paths.logs_dir().is_dir());
    }
}
