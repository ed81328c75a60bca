//! The source map v3 JSON document

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{MappingError, MappingResult};

/// The only map version this crate understands.
pub const SOURCE_MAP_VERSION: u32 = 3;

/// A source map as it appears on disk or inline in a `data:` URI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMapDocument {
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_root: Option<String>,
    /// `null` entries are read as empty strings
    #[serde(deserialize_with = "nullable_strings")]
    pub sources: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources_content: Option<Vec<Option<String>>>,
    #[serde(default)]
    pub names: Vec<String>,
    pub mappings: String,
}

fn nullable_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Vec::<Option<String>>::deserialize(deserializer)?;
    Ok(entries.into_iter().map(Option::unwrap_or_default).collect())
}

impl SourceMapDocument {
    /// Parse a document, checking the version before the rest of its shape.
    pub fn from_json(text: &str) -> MappingResult<Self> {
        Self::from_value(serde_json::from_str(text)?)
    }

    /// Parse a document from raw bytes (UTF-8 JSON).
    pub fn from_slice(bytes: &[u8]) -> MappingResult<Self> {
        Self::from_value(serde_json::from_slice(bytes)?)
    }

    fn from_value(value: serde_json::Value) -> MappingResult<Self> {
        match value.get("version").and_then(serde_json::Value::as_u64) {
            Some(version) if version == u64::from(SOURCE_MAP_VERSION) => {}
            Some(version) => return Err(MappingError::UnsupportedVersion(version)),
            None => return Err(MappingError::MissingVersion),
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Parse the payload of a `data:` URI.
    ///
    /// Only base64 payloads are accepted, e.g.
    /// `data:application/json;charset=utf-8;base64,eyJ2ZXJzaW9uIjozfQ==`.
    pub fn from_data_url(url: &str) -> MappingResult<Self> {
        let rest = url
            .strip_prefix("data:")
            .ok_or_else(|| MappingError::DataUri("missing data: scheme".to_string()))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| MappingError::DataUri("missing ',' separator".to_string()))?;
        if !header.split(';').any(|part| part.trim() == "base64") {
            return Err(MappingError::DataUri(
                "source map data URIs must be base64-encoded".to_string(),
            ));
        }
        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| MappingError::DataUri(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    pub fn to_json(&self) -> MappingResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> MappingResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Inline `data:` URI form of this document.
    pub fn to_data_url(&self) -> MappingResult<String> {
        let json = self.to_json()?;
        Ok(format!(
            "data:application/json;charset=utf-8;base64,{}",
            STANDARD.encode(json)
        ))
    }
}
