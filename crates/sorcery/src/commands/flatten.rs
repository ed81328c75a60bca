/*
 * flatten.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Flatten command implementation
 */

use std::path::PathBuf;

use anyhow::{Context, Result};
use sorcery_core::FlattenOptions;

/// Arguments for the flatten command
#[derive(Debug)]
pub struct FlattenArgs {
    pub file: PathBuf,
    pub base: Option<PathBuf>,
    pub exclude_content: bool,
}

/// Execute the flatten command
pub fn execute(args: FlattenArgs) -> Result<()> {
    let chain = super::load_chain(&args.file)?;
    let map = chain
        .flatten_with(&FlattenOptions {
            base: args.base,
            include_content: !args.exclude_content,
        })
        .context("Failed to flatten source map chain")?;
    let json = map
        .to_json_pretty()
        .context("Failed to serialize flattened source map")?;
    println!("{}", json);
    Ok(())
}
