/*
 * sorcery-runtime
 * Copyright (c) 2025 Posit, PBC
 *
 * Content provider abstraction for source map chain resolution.
 *
 * This crate provides a trait-based abstraction over file access, allowing
 * the chain builder to run in different execution environments:
 *
 * - NativeProvider: blocking std::fs access (drive with pollster)
 * - TokioProvider: non-blocking tokio::fs access
 * - MemoryProvider: in-memory files, no disk access
 */

mod memory;
mod native;
mod tokio_fs;
mod traits;

// Re-export core types (API surface)
pub use traits::{ContentProvider, ProviderError, ProviderResult};

// Re-export provider implementations
pub use memory::MemoryProvider;
pub use native::NativeProvider;
pub use tokio_fs::TokioProvider;
