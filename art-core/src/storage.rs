//! Persistence backends for documents and palette stores.
//!
//! A [`Storage`] is a flat key/value byte store. [`FileStorage`] keeps one
//! file per key in a data directory; [`MemoryStorage`] keeps everything in a
//! shared map and is what tests and disk-less callers use.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::ArtResult;

/// Key under which the document is stored.
pub const DOCUMENT_KEY: &str = "document.emojiart";

/// Key under which the palette store named `name` is stored.
#[must_use]
pub fn palette_store_key(name: &str) -> String {
    format!("{name}:paletteStore")
}

/// A byte store keyed by name.
pub trait Storage: std::fmt::Debug {
    /// Read the value for `key`, or `None` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to read.
    fn read(&self, key: &str) -> ArtResult<Option<Vec<u8>>>;

    /// Write the value for `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to write.
    fn write(&self, key: &str, bytes: &[u8]) -> ArtResult<()>;
}

/// Storage backed by files in a data directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    data_dir: PathBuf,
}

impl FileStorage {
    /// Create storage rooted at `data_dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ArtError::Io`](crate::ArtError::Io) if the directory cannot
    /// be created.
    pub fn new(data_dir: impl Into<PathBuf>) -> ArtResult<Self> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    /// The data directory.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// File that holds the value for `key`.
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.data_dir.join(sanitize_filename(key))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> ArtResult<Option<Vec<u8>>> {
        let path = self.path_for(key);
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, bytes: &[u8]) -> ArtResult<()> {
        let path = self.path_for(key);
        std::fs::write(&path, bytes)?;
        tracing::debug!("Saved {key} to {}", path.display());
        Ok(())
    }
}

/// Shared in-memory storage.
///
/// Clones share the same map, so a test can keep a handle and inspect what
/// a document or palette store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemoryStorage {
    /// Create empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    /// Check if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> ArtResult<Option<Vec<u8>>> {
        let entries = self
            .entries
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, bytes: &[u8]) -> ArtResult<()> {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        entries.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}

/// Sanitize a storage key for use as a filename.
///
/// Replaces any character that is not alphanumeric, `-`, `_`, or `.` with `_`.
fn sanitize_filename(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
