//! Attachment persistence collaborators

use crate::error::{DecodeError, Result};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

/// Persists attachment bytes and hands back an opaque reference.
///
/// A failure here aborts the whole message.
pub trait FileStore {
    fn store(&self, data: &[u8]) -> Result<String>;
}

impl<F> FileStore for F
where
    F: Fn(&[u8]) -> Result<String>,
{
    fn store(&self, data: &[u8]) -> Result<String> {
        self(data)
    }
}

/// Drops attachment bytes, returning an empty reference
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardStore;

impl FileStore for DiscardStore {
    fn store(&self, _data: &[u8]) -> Result<String> {
        Ok(String::new())
    }
}

/// Keeps attachment bytes in memory; references are `mem:<index>`
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: Mutex<Vec<Vec<u8>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes behind a reference returned by `store`
    #[must_use]
    pub fn get(&self, reference: &str) -> Option<Vec<u8>> {
        let index: usize = reference.strip_prefix("mem:")?.parse().ok()?;
        self.blobs.lock().ok()?.get(index).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.blobs.lock().map_or(0, |b| b.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FileStore for MemoryStore {
    fn store(&self, data: &[u8]) -> Result<String> {
        let mut blobs = self
            .blobs
            .lock()
            .map_err(|e| DecodeError::Store(e.to_string()))?;
        blobs.push(data.to_vec());
        Ok(format!("mem:{}", blobs.len() - 1))
    }
}

/// Writes each attachment to its own file inside a directory
#[derive(Debug, Clone)]
pub struct DirStore {
    dir: PathBuf,
}

impl DirStore {
    /// Create the store, creating `dir` if needed
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }
}

impl FileStore for DirStore {
    fn store(&self, data: &[u8]) -> Result<String> {
        let path = self.dir.join(Uuid::new_v4().to_string());
        fs::write(&path, data).map_err(|e| {
            DecodeError::Store(format!("could not write {}: {e}", path.display()))
        })?;
        debug!(path = %path.display(), size = data.len(), "Stored attachment");
        Ok(path.to_string_lossy().into_owned())
    }
}
