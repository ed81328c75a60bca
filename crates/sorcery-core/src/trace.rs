//! Tracing generated positions back to original sources

use std::path::PathBuf;

use serde::Serialize;
use sorcery_mapping::Segment;

use crate::chain::Chain;
use crate::node::{ChildRef, NodeId};

/// A position in an original source.
///
/// `line` is 1-indexed and `column` 0-indexed, like the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub source: PathBuf,
    pub line: u32,
    pub column: u32,
    pub name: Option<String>,
}

/// A traced location plus the content of the file it landed in.
pub(crate) struct Hit<'c> {
    pub location: Location,
    pub content: Option<&'c str>,
}

impl Chain {
    /// Trace a position in the root file to its original source.
    ///
    /// Returns `None` when the root has no map, when no segment covers the
    /// position, when the covering segment is an unmapped marker, or when
    /// the position leads to a blank source entry.
    ///
    /// When several layers name the position, the deepest name wins.
    pub fn trace(&self, line: u32, column: u32) -> Option<Location> {
        let mut visiting = Vec::new();
        self.trace_node(self.root_id(), line, column, &mut visiting)
            .map(|hit| hit.location)
    }

    fn trace_node(
        &self,
        id: NodeId,
        line: u32,
        column: u32,
        visiting: &mut Vec<NodeId>,
    ) -> Option<Hit<'_>> {
        let segment = self.get(id).mapping_table()?.lookup(line, column)?;
        self.follow_segment(id, segment, visiting)
    }

    /// Follow one segment of node `id`'s table down to a leaf.
    ///
    /// `visiting` holds the nodes on the current path; reaching one of them
    /// again stops the descent there.
    pub(crate) fn follow_segment(
        &self,
        id: NodeId,
        segment: &Segment,
        visiting: &mut Vec<NodeId>,
    ) -> Option<Hit<'_>> {
        let node = self.get(id);
        let table = node.mapping_table()?;
        let original = segment.original?;
        let name = original.name_index.and_then(|index| table.name(index));
        let line = original.line.saturating_add(1);

        let hit = match node.child(original.source_index)? {
            ChildRef::NotApplicable => return None,
            ChildRef::Unresolved(path) => Hit {
                location: Location {
                    source: path.clone(),
                    line,
                    column: original.column,
                    name: name.map(str::to_string),
                },
                content: None,
            },
            ChildRef::Resolved(child_id) => {
                let child = self.get(*child_id);
                if child.is_leaf() || *child_id == id || visiting.contains(child_id) {
                    Hit {
                        location: Location {
                            source: child.path().to_path_buf(),
                            line,
                            column: original.column,
                            name: name.map(str::to_string),
                        },
                        content: Some(child.content()),
                    }
                } else {
                    visiting.push(id);
                    let deeper = self.trace_node(*child_id, line, original.column, visiting);
                    visiting.pop();
                    let mut hit = deeper?;
                    if hit.location.name.is_none() {
                        hit.location.name = name.map(str::to_string);
                    }
                    hit
                }
            }
        };
        Some(hit)
    }
}
