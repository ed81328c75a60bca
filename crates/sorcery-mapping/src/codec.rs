//! VLQ mappings codec
//!
//! Generated lines are separated by `;`, segments by `,`. Each segment holds
//! 1, 4 or 5 VLQ fields: generated column, then source index, original line,
//! original column and name index. The generated column is relative to the
//! previous segment on the same line; the other fields are relative to the
//! previous occurrence anywhere in the string.
//!
//! The base64 VLQ digits themselves are handled by the `sourcemap` crate;
//! this module tracks the deltas and builds [`Segment`]s.

use sourcemap::vlq::{generate_vlq_segment, parse_vlq_segment};

use crate::error::{MappingError, MappingResult};
use crate::types::{OriginalPosition, Segment};

fn to_index(value: i64, what: &str) -> Result<u32, String> {
    u32::try_from(value).map_err(|_| format!("{} out of range: {}", what, value))
}

/// Decode a `mappings` string into one segment list per generated line.
///
/// Index 0 of the result is generated line 1. Segments within a line are
/// returned sorted by generated column.
pub fn decode(mappings: &str) -> MappingResult<Vec<Vec<Segment>>> {
    let mut lines = Vec::new();
    let mut source: i64 = 0;
    let mut original_line: i64 = 0;
    let mut original_column: i64 = 0;
    let mut name: i64 = 0;

    for (line_index, line) in mappings.split(';').enumerate() {
        let mut generated_column: i64 = 0;
        let mut segments = Vec::new();

        for (segment_index, raw) in line.split(',').enumerate() {
            if raw.is_empty() {
                continue;
            }
            let codec_error = |message: String| MappingError::Codec {
                line: line_index + 1,
                segment: segment_index,
                message,
            };

            let fields = parse_vlq_segment(raw).map_err(|e| codec_error(e.to_string()))?;
            let column = match fields.first() {
                Some(delta) => {
                    generated_column += delta;
                    to_index(generated_column, "generated column").map_err(codec_error)?
                }
                None => return Err(codec_error("segment has no fields".to_string())),
            };

            let original = match fields.len() {
                1 => None,
                4 | 5 => {
                    source += fields[1];
                    original_line += fields[2];
                    original_column += fields[3];
                    let name_index = match fields.get(4) {
                        Some(delta) => {
                            name += delta;
                            Some(to_index(name, "name index").map_err(codec_error)?)
                        }
                        None => None,
                    };
                    Some(OriginalPosition {
                        source_index: to_index(source, "source index").map_err(codec_error)?,
                        line: to_index(original_line, "original line").map_err(codec_error)?,
                        column: to_index(original_column, "original column")
                            .map_err(codec_error)?,
                        name_index,
                    })
                }
                n => return Err(codec_error(format!("segment has {} fields", n))),
            };

            segments.push(Segment {
                generated_column: column,
                original,
            });
        }

        segments.sort_by_key(|segment| segment.generated_column);
        lines.push(segments);
    }

    Ok(lines)
}

/// Encode per-line segment lists back into a `mappings` string.
pub fn encode(lines: &[Vec<Segment>]) -> MappingResult<String> {
    let mut out = String::new();
    let mut source: i64 = 0;
    let mut original_line: i64 = 0;
    let mut original_column: i64 = 0;
    let mut name: i64 = 0;

    for (line_index, line) in lines.iter().enumerate() {
        if line_index > 0 {
            out.push(';');
        }
        let mut generated_column: i64 = 0;

        for (segment_index, segment) in line.iter().enumerate() {
            if segment_index > 0 {
                out.push(',');
            }
            let mut fields = Vec::with_capacity(5);
            fields.push(i64::from(segment.generated_column) - generated_column);
            generated_column = i64::from(segment.generated_column);

            if let Some(original) = &segment.original {
                fields.push(i64::from(original.source_index) - source);
                source = i64::from(original.source_index);
                fields.push(i64::from(original.line) - original_line);
                original_line = i64::from(original.line);
                fields.push(i64::from(original.column) - original_column);
                original_column = i64::from(original.column);
                if let Some(name_index) = original.name_index {
                    fields.push(i64::from(name_index) - name);
                    name = i64::from(name_index);
                }
            }

            let encoded = generate_vlq_segment(&fields).map_err(|e| MappingError::Codec {
                line: line_index + 1,
                segment: segment_index,
                message: e.to_string(),
            })?;
            out.push_str(&encoded);
        }
    }

    Ok(out)
}
