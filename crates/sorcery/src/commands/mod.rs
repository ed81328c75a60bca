//! Command implementations for the sorcery CLI
//!
//! Each command module handles the CLI interface and delegates to
//! sorcery-core for the actual work.

pub mod flatten;
pub mod trace;
pub mod write;

use std::path::Path;

use anyhow::{Context, Result};
use sorcery_core::{BuildOptions, Chain, load_sync};

/// Load the chain rooted at `file`, with file context on failure.
pub(crate) fn load_chain(file: &Path) -> Result<Chain> {
    load_sync(file, BuildOptions::default())
        .with_context(|| format!("Failed to load source map chain for {}", file.display()))
}
