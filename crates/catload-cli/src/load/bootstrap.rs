//! One-time creation of the shared catalog schema.

use anyhow::Context;
use catload_api::{CatalogApi, EntityId, ProductTypeInput};
use catload_core::{AttributeSpec, SchemaConfig, SchemaContext};

/// Creates channel, warehouse, shipping zone, attributes, product type and
/// category in dependency order, returning the ids every build needs.
///
/// Any failure aborts the run before a single product is attempted.
pub(super) async fn bootstrap<A: CatalogApi>(
    api: &A,
    schema: &SchemaConfig,
) -> anyhow::Result<SchemaContext> {
    let channel_id = api
        .create_channel(&schema.channel)
        .await
        .with_context(|| format!("failed to create channel '{}'", schema.channel.slug))?;
    tracing::info!(channel_id = %channel_id, slug = %schema.channel.slug, "channel created");

    let warehouse_id = api
        .create_warehouse(&schema.warehouse)
        .await
        .with_context(|| format!("failed to create warehouse '{}'", schema.warehouse.name))?;
    tracing::info!(warehouse_id = %warehouse_id, "warehouse created");

    let zone_id = api
        .create_shipping_zone(
            &schema.shipping_zone.name,
            std::slice::from_ref(&warehouse_id),
            std::slice::from_ref(&channel_id),
        )
        .await
        .with_context(|| {
            format!(
                "failed to create shipping zone '{}'",
                schema.shipping_zone.name
            )
        })?;
    tracing::info!(shipping_zone_id = %zone_id, "shipping zone created");

    let mut attributes = Vec::with_capacity(schema.attributes.len());
    for attribute in &schema.attributes {
        let attribute_id = api
            .create_attribute(attribute)
            .await
            .with_context(|| format!("failed to create attribute '{}'", attribute.name))?;
        tracing::debug!(attribute_id = %attribute_id, field = %attribute.field, "attribute created");
        attributes.push(AttributeSpec {
            field: attribute.field.clone(),
            attribute_id,
        });
    }

    let has_variants = schema.product_type.has_variants;
    let vendor_attribute_id = match &schema.variant_attribute {
        Some(attribute) if has_variants => Some(
            api.create_attribute(attribute)
                .await
                .with_context(|| format!("failed to create variant attribute '{}'", attribute.name))?,
        ),
        _ => None,
    };

    let product_attribute_ids: Vec<EntityId> =
        attributes.iter().map(|a| a.attribute_id.clone()).collect();
    let variant_attribute_ids: Vec<EntityId> = vendor_attribute_id.iter().cloned().collect();
    let product_type_id = api
        .create_product_type(ProductTypeInput {
            name: &schema.product_type.name,
            has_variants,
            product_attribute_ids: &product_attribute_ids,
            variant_attribute_ids: &variant_attribute_ids,
        })
        .await
        .with_context(|| {
            format!(
                "failed to create product type '{}'",
                schema.product_type.name
            )
        })?;
    tracing::info!(product_type_id = %product_type_id, has_variants, "product type created");

    let category_id = api
        .create_category(&schema.category.name)
        .await
        .with_context(|| format!("failed to create category '{}'", schema.category.name))?;
    tracing::info!(category_id = %category_id, "category created");

    Ok(SchemaContext {
        channel_id,
        category_id,
        product_type_id,
        has_variants,
        vendor_attribute_id,
        attributes,
        metadata_keys: schema.metadata_keys.clone(),
    })
}
