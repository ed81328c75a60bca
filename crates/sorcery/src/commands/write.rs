/*
 * write.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Write command implementation
 */

use std::path::PathBuf;

use anyhow::{Context, Result};
use sorcery_core::WriteOptions;
use tracing::info;

/// Arguments for the write command
#[derive(Debug)]
pub struct WriteArgs {
    pub file: PathBuf,
    pub output: Option<PathBuf>,
    pub base: Option<PathBuf>,
    pub absolute_path: bool,
    pub datauri: bool,
    pub exclude_content: bool,
}

/// Execute the write command
///
/// A file without a source map is left alone.
pub fn execute(args: WriteArgs) -> Result<()> {
    let chain = super::load_chain(&args.file)?;
    if chain.is_original_source() {
        info!(file = %args.file.display(), "file has no source map, nothing to write");
        return Ok(());
    }

    let options = WriteOptions {
        base: args.base,
        absolute_path: args.absolute_path,
        inline: args.datauri,
        include_content: !args.exclude_content,
    };
    let dest = args.output.as_deref();
    chain.write(dest, &options).with_context(|| {
        format!(
            "Failed to write {}",
            dest.unwrap_or(args.file.as_path()).display()
        )
    })?;
    Ok(())
}
