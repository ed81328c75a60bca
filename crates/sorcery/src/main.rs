//! sorcery CLI - Main entry point

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "sorcery")]
#[command(version)]
#[command(about = "Resolve chains of source maps", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Trace a position in a generated file back to its original source
    Trace {
        /// Generated file
        file: PathBuf,

        /// Line (1-based)
        line: u32,

        /// Column (0-based)
        column: u32,
    },

    /// Print the flattened source map of a generated file
    Flatten {
        /// Generated file
        file: PathBuf,

        /// Directory the map's sources are relative to (defaults to the file's directory)
        #[arg(long)]
        base: Option<PathBuf>,

        /// Leave sourcesContent empty
        #[arg(long)]
        exclude_content: bool,
    },

    /// Write a generated file with a flattened source map
    Write {
        /// Generated file
        file: PathBuf,

        /// Destination (defaults to overwriting FILE)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Directory the map's sources are relative to (defaults to the destination's directory)
        #[arg(long)]
        base: Option<PathBuf>,

        /// Reference the map by absolute path
        #[arg(long)]
        absolute_path: bool,

        /// Inline the map as a data URI instead of writing a .map file
        #[arg(short = 'd', long)]
        datauri: bool,

        /// Leave sourcesContent empty
        #[arg(long)]
        exclude_content: bool,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sorcery=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Trace { file, line, column } => {
            commands::trace::execute(commands::trace::TraceArgs { file, line, column })
        }
        Commands::Flatten {
            file,
            base,
            exclude_content,
        } => commands::flatten::execute(commands::flatten::FlattenArgs {
            file,
            base,
            exclude_content,
        }),
        Commands::Write {
            file,
            output,
            base,
            absolute_path,
            datauri,
            exclude_content,
        } => commands::write::execute(commands::write::WriteArgs {
            file,
            output,
            base,
            absolute_path,
            datauri,
            exclude_content,
        }),
    }
}
