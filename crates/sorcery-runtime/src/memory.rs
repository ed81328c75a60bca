/*
 * memory.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * In-memory provider, used for resolution without touching disk.
 */

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use crate::traits::{ContentProvider, ProviderError, ProviderResult};

/// Provider over a map of files held in memory.
///
/// Relative paths are resolved against the provider's working directory
/// (`/` unless set with [`MemoryProvider::with_cwd`]). Writes are recorded
/// and visible to later reads.
///
/// Thread safety: Uses RwLock to satisfy Send + Sync trait bounds.
#[derive(Debug)]
pub struct MemoryProvider {
    cwd: PathBuf,
    files: RwLock<HashMap<PathBuf, Vec<u8>>>,
}

impl Default for MemoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self {
            cwd: PathBuf::from("/"),
            files: RwLock::new(HashMap::new()),
        }
    }

    /// Set the directory relative paths are resolved against.
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = normalize_components(&cwd.into());
        self
    }

    /// Add (or replace) a file.
    pub fn add_file(&self, path: impl AsRef<Path>, contents: impl Into<Vec<u8>>) -> &Self {
        let key = self.normalize_path(path.as_ref());
        self.files
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, contents.into());
        self
    }

    /// Current contents of a file, if present.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        let key = self.normalize_path(path.as_ref());
        self.files
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned()
    }

    /// Normalize a path to an absolute path.
    fn normalize_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            normalize_components(path)
        } else {
            normalize_components(&self.cwd.join(path))
        }
    }
}

/// Normalize path components (remove `.` and resolve `..`)
fn normalize_components(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::ParentDir => {
                normalized.pop();
            }
            Component::CurDir => {}
            other => normalized.push(other),
        }
    }
    if normalized.as_os_str().is_empty() {
        normalized.push("/");
    }
    normalized
}

#[async_trait]
impl ContentProvider for MemoryProvider {
    async fn read(&self, path: &Path) -> ProviderResult<Vec<u8>> {
        self.get(path).ok_or_else(|| ProviderError::NotFound {
            path: path.to_path_buf(),
        })
    }

    async fn write(&self, path: &Path, contents: &[u8]) -> ProviderResult<()> {
        self.add_file(path, contents);
        Ok(())
    }

    fn cwd(&self) -> ProviderResult<PathBuf> {
        Ok(self.cwd.clone())
    }
}
