//! Durable-record port — the seam between stores and the storage medium.
//!
//! The preset store and the assistant transcript persist through this
//! trait, never a concrete medium, so tests substitute an in-memory fake
//! and the shell wires up a file-backed implementation. Records are
//! keyed, whole-document strings; read failures are recoverable by
//! contract (callers fall back to seeded/empty state).

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum StorageError {
    Io(std::io::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io: {err}"),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// Keyed whole-record storage. One key, one durable document.
pub trait StoragePort {
    /// Read a record; `Ok(None)` when it has never been written.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    /// Write (create or replace) a record.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

// ---------------------------------------------------------------------------
// In-memory implementation (tests, ephemeral sessions)
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a record, e.g. to simulate prior sessions in tests.
    pub fn with_record(mut self, key: &str, value: &str) -> Self {
        self.records.insert(key.to_string(), value.to_string());
        self
    }
}

impl StoragePort for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.records.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.records.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// File-backed implementation (one `<key>.json` per record)
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Store records under `dir`, creating it on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StoragePort for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_round_trip() {
        let mut port = MemoryStorage::new();
        assert!(port.read("presets").unwrap().is_none());
        port.write("presets", "[]").unwrap();
        assert_eq!(port.read("presets").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn file_missing_record_is_none() {
        let dir = std::env::temp_dir().join("sift-storage-test-missing");
        let _ = std::fs::remove_dir_all(&dir);
        let port = FileStorage::new(&dir);
        assert!(port.read("presets").unwrap().is_none());
    }

    #[test]
    fn file_round_trip() {
        let dir = std::env::temp_dir().join("sift-storage-test-rt");
        let _ = std::fs::remove_dir_all(&dir);
        let mut port = FileStorage::new(&dir);
        port.write("transcript", "[]").unwrap();
        assert_eq!(port.read("transcript").unwrap().as_deref(), Some("[]"));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
