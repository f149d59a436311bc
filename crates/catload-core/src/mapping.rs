//! Conversion of flat record fields into catalog attributes and metadata.
//!
//! Everything here is pure. Absent, `null` and empty values are dropped
//! rather than sent as empty strings.

use serde::Serialize;
use serde_json::{json, Value};

use crate::context::{AttributeSpec, SchemaContext};
use crate::records::RawRecord;

/// One attribute assignment as the catalog expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeValue {
    pub id: String,
    pub values: Vec<String>,
}

/// One private/public metadata entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataItem {
    pub key: String,
    pub value: String,
}

impl MetadataItem {
    fn new(key: &str, value: String) -> Self {
        Self {
            key: key.to_owned(),
            value,
        }
    }
}

/// Renders a JSON value as catalog text.
///
/// Strings pass through, numbers use their decimal form, booleans become
/// `true`/`false`, arrays are joined with `", "`. Returns `None` for `null`,
/// blank strings and arrays with no renderable elements.
#[must_use]
pub fn value_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::Null => return None,
        Value::String(s) => s.trim().to_owned(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(value_text)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => value.to_string(),
    };
    Some(text).filter(|t| !t.is_empty())
}

fn field_text(record: &RawRecord, key: &str) -> Option<String> {
    record.field(key).as_ref().and_then(value_text)
}

/// Attribute assignments for every mapped field present on `record`.
#[must_use]
pub fn map_attributes(record: &RawRecord, specs: &[AttributeSpec]) -> Vec<AttributeValue> {
    specs
        .iter()
        .filter_map(|spec| {
            field_text(record, &spec.field).map(|text| AttributeValue {
                id: spec.attribute_id.clone(),
                values: vec![text],
            })
        })
        .collect()
}

/// Product-level metadata for every configured key present on `record`.
#[must_use]
pub fn map_metadata(record: &RawRecord, keys: &[String]) -> Vec<MetadataItem> {
    keys.iter()
        .filter_map(|key| field_text(record, key).map(|text| MetadataItem::new(key, text)))
        .collect()
}

/// Variant-level metadata tracing a variant back to its source record.
#[must_use]
pub fn variant_metadata(record: &RawRecord) -> Vec<MetadataItem> {
    [
        ("original_url", field_text(record, "url")),
        ("original_id", field_text(record, "id")),
        ("tags", field_text(record, "tags")),
    ]
    .into_iter()
    .filter_map(|(key, text)| text.map(|t| MetadataItem::new(key, t)))
    .collect()
}

/// The vendor attribute assignment for a variant, when the schema has one
/// and the record names a vendor.
#[must_use]
pub fn vendor_attribute(record: &RawRecord, schema: &SchemaContext) -> Vec<AttributeValue> {
    match (&schema.vendor_attribute_id, field_text(record, "vendor")) {
        (Some(id), Some(vendor)) => vec![AttributeValue {
            id: id.clone(),
            values: vec![vendor],
        }],
        _ => Vec::new(),
    }
}

/// Variant SKU: `"{sku}-{vendor}"` in the variant-bearing schema, the bare
/// SKU otherwise. Missing parts are left out.
#[must_use]
pub fn variant_sku(record: &RawRecord, has_variants: bool) -> String {
    let sku = record.sku.as_deref().unwrap_or_default();
    match record.vendor.as_deref() {
        Some(vendor) if has_variants && !sku.is_empty() => format!("{sku}-{vendor}"),
        Some(vendor) if has_variants => vendor.to_owned(),
        _ => sku.to_owned(),
    }
}

/// Wraps plain text in the catalog's block-based rich-text envelope.
#[must_use]
pub fn rich_text_description(text: &str) -> String {
    json!({
        "blocks": [
            { "type": "paragraph", "data": { "text": text } }
        ]
    })
    .to_string()
}

#[cfg(test)]
#[path = "mapping_test.rs"]
mod tests;
