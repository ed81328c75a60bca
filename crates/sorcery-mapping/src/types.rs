//! Core types for mapping tables

/// Where a generated position came from.
///
/// `line` is 0-indexed, exactly as encoded in the `mappings` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OriginalPosition {
    /// Index into the map's `sources`
    pub source_index: u32,
    /// Line in the source (0-indexed)
    pub line: u32,
    /// Column in the source (0-indexed)
    pub column: u32,
    /// Index into the map's `names`
    pub name_index: Option<u32>,
}

/// One mapping entry on a generated line.
///
/// A segment without an original position marks "no mapping from this
/// column on".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment {
    /// Column in the generated line (0-indexed)
    pub generated_column: u32,
    pub original: Option<OriginalPosition>,
}

impl Segment {
    /// A "no mapping" marker at `generated_column`.
    pub fn unmapped(generated_column: u32) -> Self {
        Segment {
            generated_column,
            original: None,
        }
    }

    /// A segment pointing at `(line, column)` in source `source_index`.
    pub fn mapped(generated_column: u32, source_index: u32, line: u32, column: u32) -> Self {
        Segment {
            generated_column,
            original: Some(OriginalPosition {
                source_index,
                line,
                column,
                name_index: None,
            }),
        }
    }

    /// Attach a name index. No-op on unmapped segments.
    pub fn with_name(mut self, name_index: u32) -> Self {
        if let Some(original) = self.original.as_mut() {
            original.name_index = Some(name_index);
        }
        self
    }

    pub fn is_mapped(&self) -> bool {
        self.original.is_some()
    }
}
