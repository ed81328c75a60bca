/*
 * trace.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Trace command implementation
 */

use std::path::PathBuf;

use anyhow::Result;

/// Arguments for the trace command
#[derive(Debug)]
pub struct TraceArgs {
    pub file: PathBuf,
    pub line: u32,
    pub column: u32,
}

/// Execute the trace command
///
/// Prints the original location as JSON, or `null` when the position does
/// not map anywhere.
pub fn execute(args: TraceArgs) -> Result<()> {
    if args.line == 0 {
        anyhow::bail!("Lines are 1-based, got line 0");
    }

    let chain = super::load_chain(&args.file)?;
    if chain.is_original_source() {
        tracing::info!(file = %args.file.display(), "file has no source map");
    }

    let location = chain.trace(args.line, args.column);
    println!("{}", serde_json::to_string_pretty(&location)?);
    Ok(())
}
