/*
 * flatten.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Composes a chain into a single map from the root file straight to the
 * original sources.
 */

use std::path::PathBuf;

use indexmap::{IndexMap, IndexSet};
use sorcery_mapping::{SOURCE_MAP_VERSION, Segment, SourceMapDocument, encode};

use crate::chain::Chain;
use crate::error::{ChainError, ChainResult};
use crate::paths;

/// How a flattened map is expressed.
#[derive(Debug, Clone)]
pub struct FlattenOptions {
    /// Directory `sources` are written relative to. Relative values resolve
    /// against the chain's working directory. Defaults to the root file's
    /// directory.
    pub base: Option<PathBuf>,
    /// Embed each original source's content in `sourcesContent`.
    pub include_content: bool,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        FlattenOptions {
            base: None,
            include_content: true,
        }
    }
}

impl Chain {
    /// Flatten with default options.
    pub fn flatten(&self) -> ChainResult<SourceMapDocument> {
        self.flatten_with(&FlattenOptions::default())
    }

    /// Compose every segment of the root map into one map.
    ///
    /// Unmapped markers of the root are kept, segments that cannot be traced
    /// are dropped. `sources` and `names` are listed in the order they are
    /// first reached, walking the root's lines top to bottom and each line
    /// left to right. A root without a map flattens to an empty map.
    ///
    /// Fails only if the composed mappings cannot be encoded.
    pub fn flatten_with(&self, options: &FlattenOptions) -> ChainResult<SourceMapDocument> {
        let root = self.root();
        let base = match &options.base {
            Some(base) => paths::absolutize(self.cwd(), base),
            None => paths::parent_dir(root.path()).to_path_buf(),
        };

        let mut sources: IndexMap<PathBuf, Option<&str>> = IndexMap::new();
        let mut names: IndexSet<String> = IndexSet::new();
        let mut lines: Vec<Vec<Segment>> = Vec::new();
        let mut dropped = 0usize;

        for (_, segments) in root.mapping_table().into_iter().flat_map(|table| table.lines()) {
            let mut line = Vec::with_capacity(segments.len());
            for segment in segments {
                if !segment.is_mapped() {
                    line.push(Segment::unmapped(segment.generated_column));
                    continue;
                }

                let mut visiting = Vec::new();
                let Some(hit) = self.follow_segment(self.root_id(), segment, &mut visiting) else {
                    dropped += 1;
                    continue;
                };

                let source_index = match sources.get_index_of(&hit.location.source) {
                    Some(index) => index,
                    None => sources.insert_full(hit.location.source, hit.content).0,
                };
                let mut flattened = Segment::mapped(
                    segment.generated_column,
                    source_index as u32,
                    hit.location.line.saturating_sub(1),
                    hit.location.column,
                );
                if let Some(name) = hit.location.name {
                    let (name_index, _) = names.insert_full(name);
                    flattened = flattened.with_name(name_index as u32);
                }
                line.push(flattened);
            }
            lines.push(line);
        }

        tracing::debug!(
            root = %root.path().display(),
            sources = sources.len(),
            names = names.len(),
            dropped,
            "flattened chain"
        );

        let sources_content = sources
            .values()
            .map(|content| {
                content
                    .filter(|_| options.include_content)
                    .map(str::to_string)
            })
            .collect();
        let mappings = encode(&lines)
            .map_err(|e| ChainError::from_mapping(root.path().display().to_string(), e))?;
        Ok(SourceMapDocument {
            version: SOURCE_MAP_VERSION,
            file: Some(paths::file_name(root.path())),
            source_root: None,
            sources: sources
                .keys()
                .map(|source| paths::to_slash(&paths::relative(source, &base)))
                .collect(),
            sources_content: Some(sources_content),
            names: names.into_iter().collect(),
            mappings,
        })
    }
}
