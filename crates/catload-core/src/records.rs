//! Raw product records as they appear in the search-index dump.
//!
//! The dump is a JSON array of flat objects. Identifier-like fields (`sku`,
//! `vendor`, `id`, `url`) are accepted as strings or numbers; text fields
//! that hold null or a non-scalar are treated as absent. Fields that
//! are not modelled explicitly are kept in [`RawRecord::extra`] so they can
//! be mapped to attributes or metadata by name.

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::DumpError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default, deserialize_with = "text_or_number")]
    pub sku: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub vendor: Option<String>,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub description: Option<String>,
    /// Numeric string or JSON number; parsed by [`crate::price::parse_price`].
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub image: Option<String>,
    #[serde(default)]
    pub tags: Option<Value>,
    #[serde(default)]
    pub department: Option<Value>,
    #[serde(default)]
    pub by_weight: Option<Value>,
    /// Product page URL in the source system.
    #[serde(default, deserialize_with = "text_or_number")]
    pub url: Option<String>,
    /// Record identifier in the source system.
    #[serde(default, deserialize_with = "text_or_number")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawRecord {
    /// Looks up a field by its dump name, returning `None` for absent or
    /// `null` values.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<Value> {
        let text = |v: &Option<String>| v.clone().map(Value::String);
        let value = match key {
            "sku" => text(&self.sku),
            "vendor" => text(&self.vendor),
            "name" => Some(Value::String(self.name.clone())),
            "description" => text(&self.description),
            "price" => self.price.clone(),
            "image" => text(&self.image),
            "tags" => self.tags.clone(),
            "department" => self.department.clone(),
            "by_weight" => self.by_weight.clone(),
            "url" => text(&self.url),
            "id" => text(&self.id),
            other => self.extra.get(other).cloned(),
        };
        value.filter(|v| !v.is_null())
    }

    /// The record's own image URL, treating blank strings as absent.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text_or_number(deserializer)?.unwrap_or_default())
}

/// Parse a dump held in memory.
///
/// # Errors
///
/// Returns [`DumpError::Parse`] if the text is not a JSON array of objects.
pub fn parse_records(content: &str, origin: &str) -> Result<Vec<RawRecord>, DumpError> {
    serde_json::from_str(content).map_err(|e| DumpError::Parse {
        path: origin.to_string(),
        source: e,
    })
}

/// Read and parse the dump file at `path`.
///
/// # Errors
///
/// Returns [`DumpError::Io`] if the file cannot be read, or
/// [`DumpError::Parse`] if it is not a JSON array of objects.
pub fn load_records(path: &Path) -> Result<Vec<RawRecord>, DumpError> {
    let content = std::fs::read_to_string(path).map_err(|e| DumpError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_records(&content, &path.display().to_string())
}
