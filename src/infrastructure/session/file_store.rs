//! File-backed marker store for the command line client

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::domain::{DomainError, MarkerStore};

/// Marker slot persisted as a single file holding the raw key
#[derive(Debug, Clone)]
pub struct FileMarkerStore {
    path: PathBuf,
}

impl FileMarkerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl MarkerStore for FileMarkerStore {
    fn read(&self) -> Result<Option<String>, DomainError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents.trim_end().to_string())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DomainError::internal(format!(
                "Failed to read session marker {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn write(&self, value: &str) -> Result<(), DomainError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                DomainError::internal(format!(
                    "Failed to create session directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        fs::write(&self.path, value).map_err(|e| {
            DomainError::internal(format!(
                "Failed to write session marker {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    fn clear(&self) -> Result<(), DomainError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DomainError::internal(format!(
                "Failed to clear session marker {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileMarkerStore::new(dir.path().join("validApiKey"));

        assert_eq!(store.read().unwrap(), None);
    }

    #[test]
    fn test_write_then_read_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("validApiKey");

        FileMarkerStore::new(&path).write("tvly-abc").unwrap();

        assert_eq!(
            FileMarkerStore::new(&path).read().unwrap(),
            Some("tvly-abc".to_string())
        );
    }

    #[test]
    fn test_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileMarkerStore::new(dir.path().join("validApiKey"));

        store.write("tvly-abc").unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert_eq!(store.read().unwrap(), None);
    }
}
