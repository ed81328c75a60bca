/*
 * native.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Blocking provider backed by std::fs.
 */

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::traits::{ContentProvider, ProviderError, ProviderResult};

/// Provider with direct filesystem access through `std::fs`.
///
/// Every future returned by this provider completes on its first poll, so it
/// is safe to drive with `pollster::block_on` from any thread, inside or
/// outside an async runtime.
#[derive(Debug, Clone, Default)]
pub struct NativeProvider;

impl NativeProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ContentProvider for NativeProvider {
    async fn read(&self, path: &Path) -> ProviderResult<Vec<u8>> {
        tracing::trace!(path = %path.display(), "read");
        std::fs::read(path).map_err(|e| ProviderError::from_io(path, e))
    }

    async fn write(&self, path: &Path, contents: &[u8]) -> ProviderResult<()> {
        tracing::trace!(path = %path.display(), bytes = contents.len(), "write");
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ProviderError::from_io(parent, e))?;
        }
        std::fs::write(path, contents).map_err(|e| ProviderError::from_io(path, e))
    }

    fn cwd(&self) -> ProviderResult<PathBuf> {
        std::env::current_dir().map_err(|e| ProviderError::from_io(Path::new("."), e))
    }
}
