//! Decoded mapping tables with positional lookup

use crate::codec;
use crate::document::SourceMapDocument;
use crate::error::{MappingError, MappingResult};
use crate::types::Segment;

/// A decoded source map: per-line segments plus the tables they index into.
///
/// Generated lines are 1-indexed in this API, generated and original columns
/// 0-indexed. Segments within a line are sorted by generated column and every
/// source/name index is valid; both are checked on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingTable {
    sources: Vec<String>,
    sources_content: Vec<Option<String>>,
    names: Vec<String>,
    lines: Vec<Vec<Segment>>,
}

impl MappingTable {
    /// Build a table, validating every segment's indices.
    ///
    /// `sources_content` is padded with `None` (or truncated) to the length
    /// of `sources`.
    pub fn new(
        sources: Vec<String>,
        mut sources_content: Vec<Option<String>>,
        names: Vec<String>,
        mut lines: Vec<Vec<Segment>>,
    ) -> MappingResult<Self> {
        for (index, line) in lines.iter_mut().enumerate() {
            line.sort_by_key(|segment| segment.generated_column);
            for original in line.iter().filter_map(|segment| segment.original) {
                if original.source_index as usize >= sources.len() {
                    return Err(MappingError::SourceOutOfRange {
                        line: index + 1,
                        index: original.source_index,
                        count: sources.len(),
                    });
                }
                if let Some(name_index) = original.name_index {
                    if name_index as usize >= names.len() {
                        return Err(MappingError::NameOutOfRange {
                            line: index + 1,
                            index: name_index,
                            count: names.len(),
                        });
                    }
                }
            }
        }
        sources_content.resize(sources.len(), None);

        Ok(MappingTable {
            sources,
            sources_content,
            names,
            lines,
        })
    }

    /// Decode a document's `mappings` and take over its tables.
    pub fn from_document(doc: &SourceMapDocument) -> MappingResult<Self> {
        let lines = codec::decode(&doc.mappings)?;
        Self::new(
            doc.sources.clone(),
            doc.sources_content.clone().unwrap_or_default(),
            doc.names.clone(),
            lines,
        )
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub fn source(&self, index: u32) -> Option<&str> {
        self.sources.get(index as usize).map(String::as_str)
    }

    /// Embedded content for a source, if the map carries it.
    pub fn source_content(&self, index: u32) -> Option<&str> {
        self.sources_content
            .get(index as usize)
            .and_then(|content| content.as_deref())
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn name(&self, index: u32) -> Option<&str> {
        self.names.get(index as usize).map(String::as_str)
    }

    /// Segments of a generated line (1-indexed). Empty if the line is absent.
    pub fn line(&self, line: u32) -> &[Segment] {
        line.checked_sub(1)
            .and_then(|index| self.lines.get(index as usize))
            .map_or(&[][..], Vec::as_slice)
    }

    /// All lines, 1-indexed, including empty ones.
    pub fn lines(&self) -> impl Iterator<Item = (u32, &[Segment])> {
        (1u32..).zip(self.lines.iter().map(Vec::as_slice))
    }

    /// Find the segment that covers `(line, column)`.
    ///
    /// Within the line, the last segment starting at or before `column` is
    /// chosen. If the line has no entry, or its first segment starts after
    /// `column`, the last segment of the nearest earlier non-empty line is
    /// used instead, because producers omit lines that did not change.
    ///
    /// The returned segment may be an unmapped marker; callers decide what
    /// that means.
    pub fn lookup(&self, line: u32, column: u32) -> Option<&Segment> {
        let index = line.checked_sub(1)? as usize;
        let segments = self.lines.get(index).map_or(&[][..], Vec::as_slice);

        match segments.first() {
            Some(first) if first.generated_column <= column => {
                let end = segments.partition_point(|segment| segment.generated_column <= column);
                segments.get(end - 1)
            }
            _ => self
                .lines
                .iter()
                .take(index)
                .rev()
                .find_map(|earlier| earlier.last()),
        }
    }
}
