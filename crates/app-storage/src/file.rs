//! File-backed storage backend.

use crate::{SecureStorage, StorageError, StorageResult};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

/// Stores entries as one JSON object in a file only the owner can read.
///
/// Every operation rereads the file so separate processes observe each
/// other's writes.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> StorageResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| StorageError::Encoding(e.to_string()))
    }

    /// Entries to rewrite, and whether the file on disk was unreadable.
    ///
    /// An unparseable file is treated as empty so the next write replaces it.
    fn entries_for_update(&self) -> StorageResult<(BTreeMap<String, String>, bool)> {
        match self.read_entries() {
            Ok(entries) => Ok((entries, false)),
            Err(StorageError::Encoding(reason)) => {
                warn!(path = %self.path.display(), %reason, "Storage file unreadable; starting over");
                Ok((BTreeMap::new(), true))
            }
            Err(err) => Err(err),
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> StorageResult<()> {
        let content =
            serde_json::to_string_pretty(entries).map_err(|e| StorageError::Encoding(e.to_string()))?;
        atomic_write_private(&self.path, &content)?;
        debug!(path = %self.path.display(), entries = entries.len(), "Wrote storage file");
        Ok(())
    }
}

/// Write `content` to a fresh owner-only temp file beside `path`, then rename it
/// over `path`. Readers see either the old file or the new one.
fn atomic_write_private(path: &Path, content: &str) -> io::Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "storage path has no file name"))?;
    let tmp_path = dir.join(format!(
        ".{}.template.tmp.{}",
        file_name,
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ));

    let write_result = (|| -> io::Result<()> {
        let mut file = private_options().open(&tmp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp_path, path)?;

        if let Ok(parent_dir) = fs::File::open(dir) {
            let _ = parent_dir.sync_all();
        }
        Ok(())
    })();

    if let Err(err) = write_result {
        let _ = fs::remove_file(&tmp_path);
        return Err(err);
    }
    Ok(())
}

#[cfg(unix)]
fn private_options() -> OpenOptions {
    use std::os::unix::fs::OpenOptionsExt;
    let mut options = OpenOptions::new();
    options.write(true).create_new(true).mode(0o600);
    options
}

#[cfg(not(unix))]
fn private_options() -> OpenOptions {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    options
}

impl SecureStorage for FileStorage {
    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let _guard = self.lock.lock();
        let (mut entries, _) = self.entries_for_update()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let _guard = self.lock.lock();
        Ok(self.read_entries()?.remove(key))
    }

    fn delete(&self, key: &str) -> StorageResult<bool> {
        let _guard = self.lock.lock();
        let (mut entries, recovered) = self.entries_for_update()?;
        let existed = entries.remove(key).is_some();
        if existed || recovered {
            self.write_entries(&entries)?;
        }
        Ok(existed)
    }
}
