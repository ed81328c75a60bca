/*
 * chain.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The resolved chain: an arena of nodes rooted at one generated file.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use sorcery_mapping::MappingTable;
use sorcery_runtime::ContentProvider;

use crate::node::{ChainNode, ChildRef, NodeId};

/// A file as produced by the builder, before deduplication.
#[derive(Debug)]
pub(crate) struct ResolvedFile {
    pub path: PathBuf,
    pub content: String,
    pub table: Option<MappingTable>,
    pub children: Vec<Resolution>,
}

/// How one source entry of a map was resolved.
#[derive(Debug)]
pub(crate) enum Resolution {
    File(Box<ResolvedFile>),
    /// The path is already being resolved further up the same branch.
    Ancestor(PathBuf),
    Unresolved(PathBuf),
    NotApplicable,
}

/// A fully resolved chain of files and maps.
///
/// Immutable once built; every query takes `&self`.
pub struct Chain {
    nodes: Vec<ChainNode>,
    root: NodeId,
    provider: Arc<dyn ContentProvider>,
    cwd: PathBuf,
}

impl Chain {
    pub(crate) fn from_tree(
        tree: ResolvedFile,
        provider: Arc<dyn ContentProvider>,
        cwd: PathBuf,
    ) -> Self {
        let mut interner = Interner::default();
        let root = interner.intern(tree);
        tracing::debug!(nodes = interner.nodes.len(), "chain built");
        Chain {
            nodes: interner.nodes,
            root,
            provider,
            cwd,
        }
    }

    pub fn root_id(&self) -> NodeId {
        self.root
    }

    pub fn root(&self) -> &ChainNode {
        self.get(self.root)
    }

    pub fn node(&self, id: NodeId) -> Option<&ChainNode> {
        self.nodes.get(id.0)
    }

    /// All nodes, root first, in the order they were first encountered.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &ChainNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index), node))
    }

    /// Look up a node by its absolute path.
    pub fn find(&self, path: &Path) -> Option<&ChainNode> {
        self.nodes.iter().find(|node| node.path == path)
    }

    /// True when the root file has no map, so nothing can be traced.
    pub fn is_original_source(&self) -> bool {
        self.root().is_leaf()
    }

    /// Working directory relative options are resolved against.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn provider(&self) -> &Arc<dyn ContentProvider> {
        &self.provider
    }

    /// Ids are only minted by the builder, so they are always in range.
    pub(crate) fn get(&self, id: NodeId) -> &ChainNode {
        &self.nodes[id.0]
    }
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("root", &self.root)
            .field("nodes", &self.nodes)
            .field("cwd", &self.cwd)
            .finish_non_exhaustive()
    }
}

/// Flattens a resolution tree into the arena, first encounter of a path wins.
#[derive(Default)]
struct Interner {
    nodes: Vec<ChainNode>,
    index: HashMap<PathBuf, NodeId>,
}

impl Interner {
    fn intern(&mut self, file: ResolvedFile) -> NodeId {
        if let Some(&id) = self.index.get(&file.path) {
            return id;
        }

        let id = NodeId(self.nodes.len());
        self.index.insert(file.path.clone(), id);
        self.nodes.push(ChainNode {
            path: file.path,
            content: file.content,
            table: file.table,
            children: Vec::new(),
        });

        let children = file
            .children
            .into_iter()
            .map(|child| match child {
                Resolution::File(file) => ChildRef::Resolved(self.intern(*file)),
                // ancestors are interned before their descendants
                Resolution::Ancestor(path) => match self.index.get(&path) {
                    Some(&ancestor) => ChildRef::Resolved(ancestor),
                    None => ChildRef::Unresolved(path),
                },
                Resolution::Unresolved(path) => ChildRef::Unresolved(path),
                Resolution::NotApplicable => ChildRef::NotApplicable,
            })
            .collect();
        self.nodes[id.0].children = children;
        id
    }
}
