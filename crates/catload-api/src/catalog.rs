//! The remote catalog operations the loader depends on.
//!
//! [`crate::GraphqlCatalogClient`] is the production implementation; tests
//! substitute in-process fakes.

use std::future::Future;
use std::path::Path;

use catload_core::schema::{AttributeConfig, ChannelConfig, WarehouseConfig};
use catload_core::{AttributeValue, MetadataItem};
use rust_decimal::Decimal;

use crate::error::ApiError;

/// Remote catalog identifier (opaque, assigned by the catalog).
pub type EntityId = String;

#[derive(Debug, Clone, Copy)]
pub struct ProductTypeInput<'a> {
    pub name: &'a str,
    pub has_variants: bool,
    pub product_attribute_ids: &'a [EntityId],
    pub variant_attribute_ids: &'a [EntityId],
}

#[derive(Debug, Clone, Copy)]
pub struct ProductInput<'a> {
    pub product_type_id: &'a str,
    pub name: &'a str,
    /// Rich-text JSON document.
    pub description: &'a str,
    pub category_id: &'a str,
    pub attributes: &'a [AttributeValue],
}

#[derive(Debug, Clone, Copy)]
pub struct VariantInput<'a> {
    pub product_id: &'a str,
    pub sku: &'a str,
    pub attributes: &'a [AttributeValue],
}

/// Create/update operations against the remote catalog.
///
/// Bootstrap operations run once, sequentially. Product operations run
/// concurrently from many builds, so implementations must be `Sync`.
pub trait CatalogApi: Sync {
    fn create_channel(
        &self,
        channel: &ChannelConfig,
    ) -> impl Future<Output = Result<EntityId, ApiError>> + Send;

    fn create_warehouse(
        &self,
        warehouse: &WarehouseConfig,
    ) -> impl Future<Output = Result<EntityId, ApiError>> + Send;

    fn create_shipping_zone(
        &self,
        name: &str,
        warehouse_ids: &[EntityId],
        channel_ids: &[EntityId],
    ) -> impl Future<Output = Result<EntityId, ApiError>> + Send;

    fn create_attribute(
        &self,
        attribute: &AttributeConfig,
    ) -> impl Future<Output = Result<EntityId, ApiError>> + Send;

    fn create_product_type(
        &self,
        input: ProductTypeInput<'_>,
    ) -> impl Future<Output = Result<EntityId, ApiError>> + Send;

    fn create_category(&self, name: &str)
        -> impl Future<Output = Result<EntityId, ApiError>> + Send;

    fn create_product(
        &self,
        input: ProductInput<'_>,
    ) -> impl Future<Output = Result<EntityId, ApiError>> + Send;

    /// Sets metadata on any item (product or variant).
    fn update_metadata(
        &self,
        item_id: &str,
        metadata: &[MetadataItem],
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Publishes the product and makes it available on the channel.
    fn publish_product(
        &self,
        product_id: &str,
        channel_id: &str,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    fn create_variant(
        &self,
        input: VariantInput<'_>,
    ) -> impl Future<Output = Result<EntityId, ApiError>> + Send;

    fn update_variant_listing(
        &self,
        variant_id: &str,
        channel_id: &str,
        price: Decimal,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Uploads the file at `image` as the product's media.
    fn upload_product_image(
        &self,
        product_id: &str,
        image: &Path,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    fn activate_channel(&self, channel_id: &str)
        -> impl Future<Output = Result<(), ApiError>> + Send;
}
