/*
 * tokio_fs.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Non-blocking provider backed by tokio::fs.
 */

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::traits::{ContentProvider, ProviderError, ProviderResult};

/// Provider that issues file reads through `tokio::fs`.
///
/// Must be polled from within a Tokio runtime. Reads of sibling sources are
/// issued concurrently by the chain builder, so the wait for a node's
/// children is the slowest read rather than the sum of all of them.
#[derive(Debug, Clone, Default)]
pub struct TokioProvider;

impl TokioProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ContentProvider for TokioProvider {
    async fn read(&self, path: &Path) -> ProviderResult<Vec<u8>> {
        tracing::trace!(path = %path.display(), "read (async)");
        tokio::fs::read(path)
            .await
            .map_err(|e| ProviderError::from_io(path, e))
    }

    async fn write(&self, path: &Path, contents: &[u8]) -> ProviderResult<()> {
        tracing::trace!(path = %path.display(), bytes = contents.len(), "write (async)");
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ProviderError::from_io(parent, e))?;
        }
        tokio::fs::write(path, contents)
            .await
            .map_err(|e| ProviderError::from_io(path, e))
    }

    fn cwd(&self) -> ProviderResult<PathBuf> {
        std::env::current_dir().map_err(|e| ProviderError::from_io(Path::new("."), e))
    }

    fn requires_runtime(&self) -> bool {
        true
    }
}
