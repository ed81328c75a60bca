/*
 * traits.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Defines the ContentProvider trait and its error type.
 *
 * Chain resolution only ever needs three things from its environment:
 * read a file, write a file, and know the working directory that relative
 * paths are resolved against. Everything else is pure computation.
 */

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors that can occur while reading or writing content
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The path does not exist
    #[error("File not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// The file exists but is not valid UTF-8 text
    #[error("Invalid UTF-8 in file: {}", .path.display())]
    InvalidUtf8 { path: PathBuf },

    /// Any other I/O failure
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ProviderError {
    /// Classify an `io::Error` raised while accessing `path`.
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            ProviderError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ProviderError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Abstract access to file contents.
///
/// The chain builder is written once against this trait. A provider whose
/// futures complete synchronously ([`crate::NativeProvider`]) gives the
/// blocking entry point when driven by `pollster::block_on`; a provider built
/// on `tokio::fs` ([`crate::TokioProvider`]) gives the non-blocking one.
///
/// Paths passed to providers are absolute and already normalized by the
/// caller.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Read entire file contents as bytes.
    async fn read(&self, path: &Path) -> ProviderResult<Vec<u8>>;

    /// Read file as string with UTF-8 encoding.
    ///
    /// Default implementation reads bytes and converts to string.
    async fn read_string(&self, path: &Path) -> ProviderResult<String> {
        let bytes = self.read(path).await?;
        String::from_utf8(bytes).map_err(|_| ProviderError::InvalidUtf8 {
            path: path.to_path_buf(),
        })
    }

    /// Write bytes to a file, creating parent directories as needed.
    async fn write(&self, path: &Path, contents: &[u8]) -> ProviderResult<()>;

    /// Directory that relative paths are resolved against.
    fn cwd(&self) -> ProviderResult<PathBuf>;

    /// Whether this provider's futures only make progress inside an async
    /// runtime. Such a provider must not be driven by `pollster::block_on`.
    fn requires_runtime(&self) -> bool {
        false
    }
}
