/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for chain construction and output.

use std::path::PathBuf;

use sorcery_mapping::MappingError;
use sorcery_runtime::ProviderError;
use thiserror::Error;

/// Errors that abort building or writing a chain.
#[derive(Debug, Error)]
pub enum ChainError {
    /// The root file, or a map file referenced by a comment, does not exist.
    #[error("File not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// A map could not be parsed or its mappings could not be decoded.
    #[error("Invalid source map ({origin}): {message}")]
    InvalidSourceMap { origin: String, message: String },

    /// A map declares a version other than 3.
    #[error("Unsupported source map version {version} in {origin}")]
    UnsupportedVersion { origin: String, version: u64 },

    /// Any other failure reported by the content provider.
    #[error(transparent)]
    Io(ProviderError),
}

impl ChainError {
    /// Attribute a map parsing failure to where the map came from.
    pub(crate) fn from_mapping(origin: impl Into<String>, error: MappingError) -> Self {
        let origin = origin.into();
        match error {
            MappingError::UnsupportedVersion(version) => {
                ChainError::UnsupportedVersion { origin, version }
            }
            other => ChainError::InvalidSourceMap {
                origin,
                message: other.to_string(),
            },
        }
    }
}

impl From<ProviderError> for ChainError {
    fn from(error: ProviderError) -> Self {
        match error {
            ProviderError::NotFound { path } => ChainError::NotFound { path },
            other => ChainError::Io(other),
        }
    }
}

/// Result type for chain operations.
pub type ChainResult<T> = Result<T, ChainError>;
