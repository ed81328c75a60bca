//! Nodes of a resolved chain

use std::path::{Path, PathBuf};

use sorcery_mapping::MappingTable;

/// Index of a node in its [`crate::Chain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// What a map's source entry resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildRef {
    /// A node of the chain, possibly an ancestor when a cycle was cut.
    Resolved(NodeId),
    /// The source file could not be read and no content was supplied for it.
    Unresolved(PathBuf),
    /// The source entry is blank, so there is nothing to resolve.
    NotApplicable,
}

/// One file of a chain.
///
/// A node with a mapping table has exactly one child per entry of the
/// table's `sources`; a node without one is a leaf (an original source).
#[derive(Debug, Clone)]
pub struct ChainNode {
    pub(crate) path: PathBuf,
    pub(crate) content: String,
    pub(crate) table: Option<MappingTable>,
    pub(crate) children: Vec<ChildRef>,
}

impl ChainNode {
    /// Absolute path identifying this node.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn mapping_table(&self) -> Option<&MappingTable> {
        self.table.as_ref()
    }

    pub fn children(&self) -> &[ChildRef] {
        &self.children
    }

    /// Child for a source index of this node's table.
    pub fn child(&self, source_index: u32) -> Option<&ChildRef> {
        self.children.get(source_index as usize)
    }

    pub fn is_leaf(&self) -> bool {
        self.table.is_none()
    }
}
