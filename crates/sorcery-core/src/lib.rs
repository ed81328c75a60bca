//! Source map chain resolution
//!
//! A generated file often went through several transformations, each with
//! its own source map: `app.coffee` compiled to `app.js`, minified to
//! `app.min.js`. This crate follows such chains. It finds each file's map,
//! resolves the sources that map lists, and repeats until it reaches files
//! without maps. Positions can then be traced through the whole chain, or
//! the chain can be flattened into one map from the final file to the
//! original sources.
//!
//! # Example
//!
//! ```rust,no_run
//! use sorcery_core::{BuildOptions, WriteOptions, load_sync};
//!
//! let chain = load_sync("dist/app.min.js", BuildOptions::default())?;
//!
//! if let Some(location) = chain.trace(1, 31) {
//!     println!("{}:{}:{}", location.source.display(), location.line, location.column);
//! }
//!
//! // Replace the file's map with a single flattened one
//! chain.write(None, &WriteOptions::default())?;
//! # Ok::<(), sorcery_core::ChainError>(())
//! ```

pub mod builder;
pub mod chain;
pub mod error;
pub mod flatten;
pub mod node;
pub mod paths;
pub mod reference;
pub mod trace;
pub mod write;

pub use builder::{BuildOptions, ChainBuilder, load, load_sync};
pub use chain::Chain;
pub use error::{ChainError, ChainResult};
pub use flatten::FlattenOptions;
pub use node::{ChainNode, ChildRef, NodeId};
pub use reference::MapReference;
pub use trace::Location;
pub use write::{WriteOptions, WriteOutput};

// Map types appear throughout the public API
pub use sorcery_mapping::SourceMapDocument;
