//! Catalog schema definition read from YAML.
//!
//! Describes the channel, warehouse, shipping zone, attributes, product type,
//! category and metadata keys created during bootstrap. The identifiers the
//! remote catalog assigns to these live in [`crate::SchemaContext`].

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelConfig {
    pub name: String,
    pub slug: String,
    pub currency_code: String,
    pub default_country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressConfig {
    pub street_address_1: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    #[serde(default)]
    pub country_area: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarehouseConfig {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub address: AddressConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingZoneConfig {
    pub name: String,
}

/// One attribute definition: which record `field` feeds it and how the
/// catalog should expose it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeConfig {
    pub field: String,
    pub name: String,
    #[serde(default)]
    pub storefront_search_position: Option<i32>,
    #[serde(default)]
    pub filterable_in_storefront: bool,
    #[serde(default)]
    pub filterable_in_dashboard: bool,
    #[serde(default)]
    pub available_in_grid: bool,
    #[serde(default = "default_true")]
    pub visible_in_storefront: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductTypeConfig {
    pub name: String,
    #[serde(default = "default_true")]
    pub has_variants: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaConfig {
    pub channel: ChannelConfig,
    pub warehouse: WarehouseConfig,
    pub shipping_zone: ShippingZoneConfig,
    pub product_type: ProductTypeConfig,
    pub category: CategoryConfig,
    #[serde(default)]
    pub attributes: Vec<AttributeConfig>,
    /// Variant-level attribute carrying the vendor. Required when the product
    /// type has variants, ignored otherwise.
    #[serde(default)]
    pub variant_attribute: Option<AttributeConfig>,
    #[serde(default)]
    pub metadata_keys: Vec<String>,
}

fn default_true() -> bool {
    true
}

/// Load and validate the schema configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_schema(path: &Path) -> Result<SchemaConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SchemaFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_schema(&content)
}

/// Parse and validate schema YAML already in memory.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML does not parse or fails validation.
pub fn parse_schema(content: &str) -> Result<SchemaConfig, ConfigError> {
    let schema: SchemaConfig =
        serde_yaml::from_str(content).map_err(ConfigError::SchemaFileParse)?;

    validate_schema(&schema)?;

    Ok(schema)
}

fn validate_schema(schema: &SchemaConfig) -> Result<(), ConfigError> {
    let named = [
        ("channel", schema.channel.name.as_str()),
        ("warehouse", schema.warehouse.name.as_str()),
        ("shipping zone", schema.shipping_zone.name.as_str()),
        ("product type", schema.product_type.name.as_str()),
        ("category", schema.category.name.as_str()),
    ];
    for (what, name) in named {
        if name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "{what} name must be non-empty"
            )));
        }
    }

    let slug = &schema.channel.slug;
    if slug.is_empty()
        || !slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "channel slug '{slug}' must be lowercase letters, digits and hyphens"
        )));
    }

    let currency = &schema.channel.currency_code;
    if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(ConfigError::Validation(format!(
            "currency code '{currency}' must be three uppercase letters"
        )));
    }

    let mut seen_fields = HashSet::new();
    for attribute in &schema.attributes {
        if attribute.field.trim().is_empty() || attribute.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "attribute field and name must be non-empty".to_string(),
            ));
        }
        if !seen_fields.insert(attribute.field.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate attribute field: '{}'",
                attribute.field
            )));
        }
    }

    if schema.product_type.has_variants && schema.variant_attribute.is_none() {
        return Err(ConfigError::Validation(format!(
            "product type '{}' has variants but no variant_attribute is configured",
            schema.product_type.name
        )));
    }

    let mut seen_keys = HashSet::new();
    for key in &schema.metadata_keys {
        if key.trim().is_empty() {
            return Err(ConfigError::Validation(
                "metadata keys must be non-empty".to_string(),
            ));
        }
        if !seen_keys.insert(key.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate metadata key: '{key}'"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "schema_test.rs"]
mod tests;
