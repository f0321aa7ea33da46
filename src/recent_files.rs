//! Persisted lists of recently opened files.
//!
//! Panels receive a store at construction and call `save` after every change
//! to their file list.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

pub trait RecentFilesStore {
    fn load(&self) -> Result<Vec<PathBuf>>;
    fn save(&self, files: &[PathBuf]) -> Result<()>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RecentFilesDoc {
    #[serde(default)]
    files: Vec<PathBuf>,
}

/// TOML file backed store
#[derive(Debug, Clone)]
pub struct TomlRecentFiles {
    path: PathBuf,
}

impl TomlRecentFiles {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecentFilesStore for TomlRecentFiles {
    fn load(&self) -> Result<Vec<PathBuf>> {
        if !self.path.exists() {
            tracing::debug!("No recent files at {:?}, starting fresh", self.path);
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {:?}", self.path))?;
        let doc: RecentFilesDoc = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {:?}", self.path))?;

        tracing::debug!("Loaded {} recent files from {:?}", doc.files.len(), self.path);
        Ok(doc.files)
    }

    fn save(&self, files: &[PathBuf]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let doc = RecentFilesDoc {
            files: files.to_vec(),
        };
        let contents = toml::to_string_pretty(&doc).context("Failed to serialize recent files")?;
        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write {:?}", self.path))?;

        tracing::debug!("Saved {} recent files to {:?}", files.len(), self.path);
        Ok(())
    }
}

/// In-memory store; clones share the same list
#[derive(Debug, Clone, Default)]
pub struct MemoryRecentFiles {
    files: Rc<RefCell<Vec<PathBuf>>>,
}

impl MemoryRecentFiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_files(files: Vec<PathBuf>) -> Self {
        Self {
            files: Rc::new(RefCell::new(files)),
        }
    }

    pub fn snapshot(&self) -> Vec<PathBuf> {
        self.files.borrow().clone()
    }
}

impl RecentFilesStore for MemoryRecentFiles {
    fn load(&self) -> Result<Vec<PathBuf>> {
        Ok(self.snapshot())
    }

    fn save(&self, files: &[PathBuf]) -> Result<()> {
        *self.files.borrow_mut() = files.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = TomlRecentFiles::new(dir.path().join("recent_text.toml"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = TomlRecentFiles::new(dir.path().join("nested").join("recent.toml"));
        let files = vec![PathBuf::from("/books/a.txt"), PathBuf::from("/books/b.txt")];

        store.save(&files).unwrap();
        assert_eq!(store.load().unwrap(), files);

        store.save(&files[1..]).unwrap();
        assert_eq!(store.load().unwrap(), vec![PathBuf::from("/books/b.txt")]);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recent.toml");
        fs::write(&path, "files = [[[").unwrap();
        assert!(TomlRecentFiles::new(path).load().is_err());
    }

    #[test]
    fn test_memory_store_is_shared_between_clones() {
        let store = MemoryRecentFiles::new();
        let clone = store.clone();
        clone.save(&[PathBuf::from("x.png")]).unwrap();
        assert_eq!(store.snapshot(), vec![PathBuf::from("x.png")]);
    }
}
