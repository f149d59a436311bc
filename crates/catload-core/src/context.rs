/// Maps a record field to the catalog attribute created for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSpec {
    pub field: String,
    pub attribute_id: String,
}

/// Identifiers produced by bootstrap, shared read-only by every product build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaContext {
    pub channel_id: String,
    pub category_id: String,
    pub product_type_id: String,
    pub has_variants: bool,
    /// Attribute carrying the vendor on each variant; `None` when the
    /// product type has no variants.
    pub vendor_attribute_id: Option<String>,
    pub attributes: Vec<AttributeSpec>,
    pub metadata_keys: Vec<String>,
}
