/*
 * reference.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Finds, removes and renders `sourceMappingURL` comments.
 *
 * Recognized forms when reading:
 * - `//# sourceMappingURL=<value>` and the legacy `//@ sourceMappingURL=<value>`
 * - `/*# sourceMappingURL=<value> */` (and `/*@ ... */`)
 *
 * When several comments are present the last one wins.
 */

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use regex::Regex;

/// A reference comment, one per line, capturing the value.
static REFERENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)(?://|/\*)[#@][ \t]*sourceMappingURL=([^\r\n]*?)[ \t]*(?:\*/)?[ \t]*\r?$")
        .expect("reference comment pattern is valid")
});

/// A reference comment at the very end of the content, with the line breaks
/// and whitespace around it.
static TRAILING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\r?\n)*[ \t]*(?://[#@][ \t]*sourceMappingURL=[^\r\n]*|/\*[#@][ \t]*sourceMappingURL=[^\r\n]*?\*/)\s*\z")
        .expect("trailing reference pattern is valid")
});

/// Characters `encodeURI` leaves alone, on top of ASCII alphanumerics.
const URI_RESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b';')
    .remove(b',')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'#');

/// Where a file's map lives, as declared by its reference comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapReference {
    /// A `data:` URI carrying the map itself.
    Inline(String),
    /// A (percent-decoded) path, relative to the referencing file's directory
    /// unless absolute.
    File(PathBuf),
}

/// Find the last reference comment in `content`.
///
/// An empty value is treated as no reference at all.
pub fn locate(content: &str) -> Option<MapReference> {
    let value = REFERENCE_RE
        .captures_iter(content)
        .filter_map(|captures| captures.get(1))
        .map(|value| value.as_str().trim())
        .filter(|value| !value.is_empty())
        .last()?;

    if value.starts_with("data:") {
        Some(MapReference::Inline(value.to_string()))
    } else {
        let decoded = percent_decode_str(value).decode_utf8_lossy();
        Some(MapReference::File(PathBuf::from(decoded.as_ref())))
    }
}

/// Remove a trailing reference comment and any trailing whitespace,
/// including indented blank lines.
pub fn strip(content: &str) -> &str {
    let end = TRAILING_RE
        .find(content)
        .map_or(content.len(), |found| found.start());
    content[..end].trim_end()
}

/// Percent-encode a map reference the way `encodeURI` does.
pub fn encode_uri(value: &str) -> String {
    utf8_percent_encode(value, URI_RESERVED).to_string()
}

/// Comment syntax used when writing a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// `//# sourceMappingURL=...`
    Line,
    /// `/*# sourceMappingURL=... */`
    Block,
}

impl CommentStyle {
    /// Style sheets only have block comments.
    pub fn for_path(path: &Path) -> Self {
        let is_css = path
            .extension()
            .is_some_and(|extension| extension.eq_ignore_ascii_case("css"));
        if is_css {
            CommentStyle::Block
        } else {
            CommentStyle::Line
        }
    }

    /// The comment, with a leading and a trailing line break. `url` is
    /// encoded here.
    pub fn render(self, url: &str) -> String {
        let url = encode_uri(url);
        match self {
            CommentStyle::Line => format!("\n//# sourceMappingURL={}\n", url),
            CommentStyle::Block => format!("\n/*# sourceMappingURL={} */\n", url),
        }
    }
}
