//! Persisted search index on disk.
//!
//! The index is a pretty-printed JSON array of [`SearchDocument`] stored in
//! the content root. Writes go through a temporary file and a rename so a
//! reader never observes a half-written index.

use crate::{Error, Result, SearchDocument};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default file name of the persisted index.
pub const DEFAULT_INDEX_FILE: &str = "shiori-search-index.json";

/// Handle to the persisted index of one content root.
#[derive(Debug, Clone)]
pub struct IndexStore {
    path: PathBuf,
}

impl IndexStore {
    /// Store using the default file name inside `root`.
    pub fn new(root: &Path) -> Self {
        Self::with_file_name(root, DEFAULT_INDEX_FILE)
    }

    /// Store using a custom file name inside `root`.
    pub fn with_file_name(root: &Path, file_name: &str) -> Self {
        Self {
            path: root.join(file_name),
        }
    }

    /// Store backed by an arbitrary index file.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load the persisted index.
    ///
    /// Returns `Ok(None)` when no index file exists. A file that exists but
    /// does not parse is a storage error.
    pub fn load(&self) -> Result<Option<Vec<SearchDocument>>> {
        if !self.exists() {
            debug!("No persisted index at {}", self.path.display());
            return Ok(None);
        }

        let json = fs::read_to_string(&self.path)
            .map_err(|e| Error::Storage(format!("Failed to read search index: {e}")))?;
        let docs: Vec<SearchDocument> = serde_json::from_str(&json).map_err(|e| {
            Error::Storage(format!(
                "Failed to parse search index {}: {e}",
                self.path.display()
            ))
        })?;

        debug!("Loaded {} documents from {}", docs.len(), self.path.display());
        Ok(Some(docs))
    }

    /// Serialize and atomically persist `docs`.
    pub fn save(&self, docs: &[SearchDocument]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    Error::Storage(format!("Failed to create index directory: {e}"))
                })?;
            }
        }

        let json = serde_json::to_string_pretty(docs)
            .map_err(|e| Error::Storage(format!("Failed to serialize search index: {e}")))?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json)
            .map_err(|e| Error::Storage(format!("Failed to write temp index: {e}")))?;

        #[cfg(target_os = "windows")]
        if self.path.exists() {
            fs::remove_file(&self.path)
                .map_err(|e| Error::Storage(format!("Failed to remove existing index: {e}")))?;
        }
        fs::rename(&tmp_path, &self.path)
            .map_err(|e| Error::Storage(format!("Failed to persist search index: {e}")))?;

        info!("Wrote {} documents to {}", docs.len(), self.path.display());
        Ok(())
    }
}
