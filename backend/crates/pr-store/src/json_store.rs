//! Whole-document JSON persistence.
//!
//! Documents are small and rewritten in full after every mutation. Writes go
//! to a temp file in the same directory which is then renamed over the
//! target, so a crash mid-write leaves the previous version intact.

use crate::{Document, Result as StoreResult, StoreError};

use std::io::Write;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;

#[derive(Debug, Clone)]
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    /// Open the store rooted at `root`, creating the directory if needed.
    pub fn open<P: Into<PathBuf>>(root: P) -> StoreResult<Self> {
        let root = root.into();

        if !root.exists() {
            std::fs::create_dir_all(&root).map_err(|e| StoreError::io(root.clone(), e))?;
        }

        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, document: Document) -> PathBuf {
        self.root.join(document.file_name())
    }

    /// Load a document. A missing file yields `T::default()`.
    pub fn load<T>(&self, document: Document) -> StoreResult<T>
    where
        T: DeserializeOwned + Default,
    {
        let path = self.path(document);

        if !path.exists() {
            debug!("{} not found, starting empty", path.display());
            return Ok(T::default());
        }

        let contents = std::fs::read_to_string(&path).map_err(|e| StoreError::io(path.clone(), e))?;

        if contents.trim().is_empty() {
            return Ok(T::default());
        }

        serde_json::from_str(&contents).map_err(|e| StoreError::json(path, e))
    }

    /// Replace a document with `value`, pretty-printed.
    pub fn save<T>(&self, document: Document, value: &T) -> StoreResult<()>
    where
        T: Serialize,
    {
        let path = self.path(document);

        let mut contents =
            serde_json::to_vec_pretty(value).map_err(|e| StoreError::json(path.clone(), e))?;
        contents.push(b'\n');

        let mut file =
            NamedTempFile::new_in(&self.root).map_err(|e| StoreError::io(self.root.clone(), e))?;
        file.write_all(&contents)
            .and_then(|()| file.as_file().sync_all())
            .map_err(|e| StoreError::io(file.path().to_path_buf(), e))?;
        file.persist(&path)
            .map_err(|e| StoreError::io(path.clone(), e.error))?;

        debug!("Wrote {} ({} bytes)", path.display(), contents.len());

        Ok(())
    }
}
