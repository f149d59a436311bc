//! In-memory `CatalogApi` that records every call.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use catload_api::{ApiError, CatalogApi, EntityId, ProductInput, ProductTypeInput, VariantInput};
use catload_core::schema::{AttributeConfig, ChannelConfig, WarehouseConfig};
use catload_core::{AttributeValue, MetadataItem};
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq)]
pub(super) enum Call {
    Channel {
        slug: String,
    },
    Warehouse {
        name: String,
    },
    ShippingZone {
        name: String,
        warehouse_ids: Vec<EntityId>,
        channel_ids: Vec<EntityId>,
    },
    Attribute {
        name: String,
    },
    ProductType {
        has_variants: bool,
        product_attribute_ids: Vec<EntityId>,
        variant_attribute_ids: Vec<EntityId>,
    },
    Category {
        name: String,
    },
    Product {
        name: String,
        description: String,
        attributes: Vec<AttributeValue>,
    },
    Metadata {
        item_id: String,
        metadata: Vec<MetadataItem>,
    },
    Publish {
        product_id: String,
        channel_id: String,
    },
    Variant {
        product_id: String,
        sku: String,
        attributes: Vec<AttributeValue>,
    },
    Listing {
        variant_id: String,
        channel_id: String,
        price: Decimal,
    },
    Upload {
        product_id: String,
        path: PathBuf,
        bytes: Vec<u8>,
    },
    ActivateChannel {
        channel_id: String,
    },
}

impl Call {
    pub(super) fn kind(&self) -> &'static str {
        match self {
            Call::Channel { .. } => "channel",
            Call::Warehouse { .. } => "warehouse",
            Call::ShippingZone { .. } => "shipping_zone",
            Call::Attribute { .. } => "attribute",
            Call::ProductType { .. } => "product_type",
            Call::Category { .. } => "category",
            Call::Product { .. } => "product",
            Call::Metadata { .. } => "metadata",
            Call::Publish { .. } => "publish",
            Call::Variant { .. } => "variant",
            Call::Listing { .. } => "listing",
            Call::Upload { .. } => "upload",
            Call::ActivateChannel { .. } => "activate_channel",
        }
    }
}

#[derive(Default)]
pub(super) struct FakeCatalog {
    next_id: AtomicUsize,
    calls: Mutex<Vec<Call>>,
    fail_kind: Option<&'static str>,
    rejected_skus: Vec<String>,
    latency: Option<Duration>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl FakeCatalog {
    /// Every call of `kind` is rejected.
    pub(super) fn failing_on(kind: &'static str) -> Self {
        Self {
            fail_kind: Some(kind),
            ..Self::default()
        }
    }

    /// Variant creation is rejected for `sku` only.
    pub(super) fn rejecting_variant(sku: &str) -> Self {
        Self {
            rejected_skus: vec![sku.to_owned()],
            ..Self::default()
        }
    }

    /// Product creation sleeps for `latency` so builds overlap.
    pub(super) fn with_latency(latency: Duration) -> Self {
        Self {
            latency: Some(latency),
            ..Self::default()
        }
    }

    /// Highest number of product creations observed in flight at once.
    pub(super) fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    pub(super) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub(super) fn calls_of(&self, kind: &str) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| call.kind() == kind)
            .collect()
    }

    fn record(&self, call: Call) -> Result<EntityId, ApiError> {
        let kind = call.kind();
        self.calls.lock().unwrap().push(call);
        if self.fail_kind == Some(kind) {
            return Err(rejected(kind, "rejected by fake catalog"));
        }
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        Ok(format!("{kind}-{n}"))
    }
}

fn rejected(operation: &str, message: &str) -> ApiError {
    ApiError::Mutation {
        operation: operation.to_owned(),
        message: message.to_owned(),
    }
}

impl CatalogApi for FakeCatalog {
    async fn create_channel(&self, channel: &ChannelConfig) -> Result<EntityId, ApiError> {
        self.record(Call::Channel {
            slug: channel.slug.clone(),
        })
    }

    async fn create_warehouse(&self, warehouse: &WarehouseConfig) -> Result<EntityId, ApiError> {
        self.record(Call::Warehouse {
            name: warehouse.name.clone(),
        })
    }

    async fn create_shipping_zone(
        &self,
        name: &str,
        warehouse_ids: &[EntityId],
        channel_ids: &[EntityId],
    ) -> Result<EntityId, ApiError> {
        self.record(Call::ShippingZone {
            name: name.to_owned(),
            warehouse_ids: warehouse_ids.to_vec(),
            channel_ids: channel_ids.to_vec(),
        })
    }

    async fn create_attribute(&self, attribute: &AttributeConfig) -> Result<EntityId, ApiError> {
        self.record(Call::Attribute {
            name: attribute.name.clone(),
        })
    }

    async fn create_product_type(&self, input: ProductTypeInput<'_>) -> Result<EntityId, ApiError> {
        self.record(Call::ProductType {
            has_variants: input.has_variants,
            product_attribute_ids: input.product_attribute_ids.to_vec(),
            variant_attribute_ids: input.variant_attribute_ids.to_vec(),
        })
    }

    async fn create_category(&self, name: &str) -> Result<EntityId, ApiError> {
        self.record(Call::Category {
            name: name.to_owned(),
        })
    }

    async fn create_product(&self, input: ProductInput<'_>) -> Result<EntityId, ApiError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.record(Call::Product {
            name: input.name.to_owned(),
            description: input.description.to_owned(),
            attributes: input.attributes.to_vec(),
        })
    }

    async fn update_metadata(
        &self,
        item_id: &str,
        metadata: &[MetadataItem],
    ) -> Result<(), ApiError> {
        self.record(Call::Metadata {
            item_id: item_id.to_owned(),
            metadata: metadata.to_vec(),
        })
        .map(drop)
    }

    async fn publish_product(&self, product_id: &str, channel_id: &str) -> Result<(), ApiError> {
        self.record(Call::Publish {
            product_id: product_id.to_owned(),
            channel_id: channel_id.to_owned(),
        })
        .map(drop)
    }

    async fn create_variant(&self, input: VariantInput<'_>) -> Result<EntityId, ApiError> {
        let id = self.record(Call::Variant {
            product_id: input.product_id.to_owned(),
            sku: input.sku.to_owned(),
            attributes: input.attributes.to_vec(),
        })?;
        if self.rejected_skus.iter().any(|sku| sku == input.sku) {
            return Err(rejected("productVariantCreate", "sku: duplicate"));
        }
        Ok(id)
    }

    async fn update_variant_listing(
        &self,
        variant_id: &str,
        channel_id: &str,
        price: Decimal,
    ) -> Result<(), ApiError> {
        self.record(Call::Listing {
            variant_id: variant_id.to_owned(),
            channel_id: channel_id.to_owned(),
            price,
        })
        .map(drop)
    }

    async fn upload_product_image(&self, product_id: &str, image: &Path) -> Result<(), ApiError> {
        let bytes = std::fs::read(image).map_err(|source| ApiError::Io {
            path: image.display().to_string(),
            source,
        })?;
        self.record(Call::Upload {
            product_id: product_id.to_owned(),
            path: image.to_path_buf(),
            bytes,
        })
        .map(drop)
    }

    async fn activate_channel(&self, channel_id: &str) -> Result<(), ApiError> {
        self.record(Call::ActivateChannel {
            channel_id: channel_id.to_owned(),
        })
        .map(drop)
    }
}
