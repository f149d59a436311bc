//! HTTP client for the catalog's GraphQL endpoint.

mod documents;
mod response;
mod upload;

use std::path::Path;
use std::time::Duration;

use catload_core::schema::{AttributeConfig, ChannelConfig, WarehouseConfig};
use catload_core::MetadataItem;
use reqwest::{Client, Url};
use rust_decimal::Decimal;
use serde_json::{json, Value};

use crate::catalog::{CatalogApi, EntityId, ProductInput, ProductTypeInput, VariantInput};
use crate::error::ApiError;
use documents::Operation;
use response::{entity_id, mutation_payload};

/// Client for the catalog GraphQL API.
///
/// Every mutation is posted as `{"query", "variables"}` JSON with a bearer
/// token. HTTP failures, top-level GraphQL errors and per-mutation
/// validation errors all surface as [`ApiError`]. Requests are never
/// retried: catalog mutations are not idempotent.
pub struct GraphqlCatalogClient {
    client: Client,
    endpoint: Url,
    auth_token: String,
}

impl GraphqlCatalogClient {
    /// Creates a client with the given request timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidEndpoint`] if `endpoint` is not an absolute
    /// URL, or [`ApiError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed.
    pub fn new(
        endpoint: &str,
        auth_token: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ApiError> {
        let endpoint = Url::parse(endpoint).map_err(|e| ApiError::InvalidEndpoint {
            url: endpoint.to_owned(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            endpoint,
            auth_token: auth_token.to_owned(),
        })
    }

    /// Posts `operation` with `variables` and returns its payload.
    async fn mutate(&self, operation: &Operation, variables: Value) -> Result<Value, ApiError> {
        let body = json!({ "query": operation.document, "variables": variables });
        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.auth_token)
            .json(&body)
            .send()
            .await?;
        Self::read_payload(operation, response).await
    }

    async fn read_payload(
        operation: &Operation,
        response: reqwest::Response,
    ) -> Result<Value, ApiError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::UnexpectedStatus {
                status: status.as_u16(),
                operation: operation.field.to_owned(),
            });
        }

        let text = response.text().await?;
        let body: Value = serde_json::from_str(&text).map_err(|e| ApiError::Deserialize {
            context: format!("{} response", operation.field),
            source: e,
        })?;

        mutation_payload(operation.field, body)
    }

    async fn create(
        &self,
        operation: &Operation,
        entity: &str,
        variables: Value,
    ) -> Result<EntityId, ApiError> {
        let payload = self.mutate(operation, variables).await?;
        let id = entity_id(operation.field, &payload, entity)?;
        tracing::debug!(operation = operation.field, id = %id, "created {entity}");
        Ok(id)
    }
}

impl CatalogApi for GraphqlCatalogClient {
    async fn create_channel(&self, channel: &ChannelConfig) -> Result<EntityId, ApiError> {
        let input = json!({
            "name": channel.name,
            "slug": channel.slug,
            "currencyCode": channel.currency_code,
            "defaultCountry": channel.default_country,
            "isActive": false,
        });
        self.create(&documents::CHANNEL_CREATE, "channel", json!({ "input": input }))
            .await
    }

    async fn create_warehouse(&self, warehouse: &WarehouseConfig) -> Result<EntityId, ApiError> {
        let address = &warehouse.address;
        let input = json!({
            "name": warehouse.name,
            "email": warehouse.email,
            "address": {
                "streetAddress1": address.street_address_1,
                "city": address.city,
                "postalCode": address.postal_code,
                "country": address.country,
                "countryArea": address.country_area,
            },
        });
        self.create(
            &documents::WAREHOUSE_CREATE,
            "warehouse",
            json!({ "input": input }),
        )
        .await
    }

    async fn create_shipping_zone(
        &self,
        name: &str,
        warehouse_ids: &[EntityId],
        channel_ids: &[EntityId],
    ) -> Result<EntityId, ApiError> {
        let input = json!({
            "name": name,
            "addWarehouses": warehouse_ids,
            "addChannels": channel_ids,
        });
        self.create(
            &documents::SHIPPING_ZONE_CREATE,
            "shippingZone",
            json!({ "input": input }),
        )
        .await
    }

    async fn create_attribute(&self, attribute: &AttributeConfig) -> Result<EntityId, ApiError> {
        let input = json!({
            "name": attribute.name,
            "type": "PRODUCT_TYPE",
            "inputType": "DROPDOWN",
            "storefrontSearchPosition": attribute.storefront_search_position,
            "filterableInStorefront": attribute.filterable_in_storefront,
            "filterableInDashboard": attribute.filterable_in_dashboard,
            "availableInGrid": attribute.available_in_grid,
            "visibleInStorefront": attribute.visible_in_storefront,
        });
        self.create(
            &documents::ATTRIBUTE_CREATE,
            "attribute",
            json!({ "input": input }),
        )
        .await
    }

    async fn create_product_type(&self, input: ProductTypeInput<'_>) -> Result<EntityId, ApiError> {
        let input = json!({
            "name": input.name,
            "kind": "NORMAL",
            "hasVariants": input.has_variants,
            "productAttributes": input.product_attribute_ids,
            "variantAttributes": input.variant_attribute_ids,
        });
        self.create(
            &documents::PRODUCT_TYPE_CREATE,
            "productType",
            json!({ "input": input }),
        )
        .await
    }

    async fn create_category(&self, name: &str) -> Result<EntityId, ApiError> {
        self.create(
            &documents::CATEGORY_CREATE,
            "category",
            json!({ "input": { "name": name } }),
        )
        .await
    }

    async fn create_product(&self, input: ProductInput<'_>) -> Result<EntityId, ApiError> {
        let input = json!({
            "productType": input.product_type_id,
            "name": input.name,
            "description": input.description,
            "category": input.category_id,
            "attributes": input.attributes,
        });
        self.create(&documents::PRODUCT_CREATE, "product", json!({ "input": input }))
            .await
    }

    async fn update_metadata(
        &self,
        item_id: &str,
        metadata: &[MetadataItem],
    ) -> Result<(), ApiError> {
        self.mutate(
            &documents::UPDATE_METADATA,
            json!({ "id": item_id, "input": metadata }),
        )
        .await?;
        Ok(())
    }

    async fn publish_product(&self, product_id: &str, channel_id: &str) -> Result<(), ApiError> {
        let input = json!({
            "updateChannels": [{
                "channelId": channel_id,
                "isPublished": true,
                "visibleInListings": true,
                "isAvailableForPurchase": true,
            }],
        });
        self.mutate(
            &documents::PRODUCT_CHANNEL_LISTING_UPDATE,
            json!({ "id": product_id, "input": input }),
        )
        .await?;
        Ok(())
    }

    async fn create_variant(&self, input: VariantInput<'_>) -> Result<EntityId, ApiError> {
        let input = json!({
            "product": input.product_id,
            "sku": input.sku,
            "attributes": input.attributes,
            "trackInventory": false,
        });
        self.create(
            &documents::PRODUCT_VARIANT_CREATE,
            "productVariant",
            json!({ "input": input }),
        )
        .await
    }

    async fn update_variant_listing(
        &self,
        variant_id: &str,
        channel_id: &str,
        price: Decimal,
    ) -> Result<(), ApiError> {
        let input = json!([{ "channelId": channel_id, "price": price.to_string() }]);
        self.mutate(
            &documents::PRODUCT_VARIANT_CHANNEL_LISTING_UPDATE,
            json!({ "id": variant_id, "input": input }),
        )
        .await?;
        Ok(())
    }

    async fn upload_product_image(&self, product_id: &str, image: &Path) -> Result<(), ApiError> {
        let operation = &documents::PRODUCT_MEDIA_CREATE;
        let form = upload::media_form(operation, product_id, image).await?;
        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.auth_token)
            .multipart(form)
            .send()
            .await?;
        Self::read_payload(operation, response).await?;
        Ok(())
    }

    async fn activate_channel(&self, channel_id: &str) -> Result<(), ApiError> {
        self.mutate(&documents::CHANNEL_ACTIVATE, json!({ "id": channel_id }))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
