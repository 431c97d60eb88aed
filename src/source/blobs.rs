use crate::source::{BlobStore, FetchError};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

/// Slip photos stored as files under one root directory.
#[derive(Debug, Clone)]
pub struct DirBlobStore {
    root: PathBuf,
}

impl DirBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a storage path below the root; absolute paths and `..` are refused.
    fn resolve(&self, storage_path: &str) -> Result<PathBuf, FetchError> {
        let rel = Path::new(storage_path);
        let escapes = rel
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if storage_path.trim().is_empty() || escapes {
            return Err(FetchError::InvalidPath(storage_path.to_string()));
        }
        Ok(self.root.join(rel))
    }
}

impl BlobStore for DirBlobStore {
    fn fetch(&self, storage_path: &str) -> Result<Vec<u8>, FetchError> {
        let path = self.resolve(storage_path)?;
        std::fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => FetchError::NotFound(storage_path.to_string()),
            ErrorKind::TimedOut => FetchError::TimedOut(storage_path.to_string()),
            _ => FetchError::Io {
                path: storage_path.to_string(),
                source: e,
            },
        })
    }
}

/// Blobs held in memory, keyed by storage path.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    blobs: HashMap<String, Vec<u8>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, storage_path: impl Into<String>, bytes: Vec<u8>) {
        self.blobs.insert(storage_path.into(), bytes);
    }

    pub fn with(mut self, storage_path: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.insert(storage_path, bytes);
        self
    }
}

impl BlobStore for MemoryBlobStore {
    fn fetch(&self, storage_path: &str) -> Result<Vec<u8>, FetchError> {
        self.blobs
            .get(storage_path)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(storage_path.to_string()))
    }
}
