/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for map documents and mappings.

use thiserror::Error;

/// Errors that can occur while reading a map document or its mappings.
#[derive(Debug, Error)]
pub enum MappingError {
    /// The document is not valid JSON, or lacks a mandatory field.
    #[error("Invalid source map JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The document has no numeric `version` field.
    #[error("Source map has no version field")]
    MissingVersion,

    /// Only version 3 maps are understood.
    #[error("Unsupported source map version {0} (expected 3)")]
    UnsupportedVersion(u64),

    /// The `mappings` string could not be decoded.
    #[error("Invalid mappings on generated line {line}, segment {segment}: {message}")]
    Codec {
        line: usize,
        segment: usize,
        message: String,
    },

    /// A segment refers past the end of `sources`.
    #[error("Segment on generated line {line} references source {index}, but the map has {count} sources")]
    SourceOutOfRange { line: usize, index: u32, count: usize },

    /// A segment refers past the end of `names`.
    #[error("Segment on generated line {line} references name {index}, but the map has {count} names")]
    NameOutOfRange { line: usize, index: u32, count: usize },

    /// A `data:` URI that is not base64 encoded JSON.
    #[error("Invalid data URI: {0}")]
    DataUri(String),
}

/// Result type for mapping operations.
pub type MappingResult<T> = Result<T, MappingError>;
