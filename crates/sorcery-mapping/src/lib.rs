//! Source map documents and mapping tables
//!
//! This crate holds the data side of source map chain resolution: the v3
//! JSON document, the base64 VLQ codec for its `mappings` field, and the
//! decoded [`MappingTable`] with positional lookup.
//!
//! # Example
//!
//! ```rust
//! use sorcery_mapping::*;
//!
//! let doc = SourceMapDocument::from_json(
//!     r#"{"version":3,"sources":["app.ts"],"names":[],"mappings":"AAAA,IAAI"}"#,
//! ).unwrap();
//! let table = MappingTable::from_document(&doc).unwrap();
//!
//! // generated line 1, column 6 falls in the segment starting at column 4
//! let segment = table.lookup(1, 6).unwrap();
//! assert_eq!(segment.generated_column, 4);
//! assert_eq!(segment.original.unwrap().column, 4);
//! ```

pub mod codec;
pub mod document;
pub mod error;
pub mod table;
pub mod types;

// Re-export main types
pub use codec::{decode, encode};
pub use document::{SOURCE_MAP_VERSION, SourceMapDocument};
pub use error::{MappingError, MappingResult};
pub use table::MappingTable;
pub use types::{OriginalPosition, Segment};
