//! Per-product orchestration of catalog mutations.
//!
//! A build runs its steps strictly in order, each depending on the id the
//! previous one returned. Any failure stops that product and is reported in
//! its [`IngestionOutcome`]; nothing is rolled back.

use catload_api::{
    ApiError, CatalogApi, EntityId, ImageError, ImageFetcher, ProductInput, VariantInput,
};
use catload_core::price::parse_price;
use catload_core::{mapping, ImageFailurePolicy, LogicalProduct, PriceError, RawRecord, SchemaContext};
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BuildStep {
    CreateProduct,
    ProductMetadata,
    PublishProduct,
    CreateVariant,
    VariantListing,
    VariantMetadata,
    UploadImage,
}

impl std::fmt::Display for BuildStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BuildStep::CreateProduct => "create product",
            BuildStep::ProductMetadata => "product metadata",
            BuildStep::PublishProduct => "publish product",
            BuildStep::CreateVariant => "create variant",
            BuildStep::VariantListing => "variant listing",
            BuildStep::VariantMetadata => "variant metadata",
            BuildStep::UploadImage => "upload image",
        };
        f.write_str(name)
    }
}

/// Why a product build stopped.
#[derive(Debug, Error)]
pub(crate) enum BuildError {
    #[error("{step} failed: {source}")]
    Api {
        step: BuildStep,
        #[source]
        source: ApiError,
    },

    #[error("image fetch failed: {0}")]
    Image(#[source] ImageError),

    #[error("record {record}: {source}")]
    InvalidPrice {
        record: String,
        #[source]
        source: PriceError,
    },
}

fn at(step: BuildStep) -> impl FnOnce(ApiError) -> BuildError {
    move |source| BuildError::Api { step, source }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ImageStatus {
    Uploaded,
    /// No member record carried an image URL.
    NoImage,
    /// The fetch failed and the image policy allowed continuing without it.
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BuildSummary {
    pub variants_created: usize,
    pub image: ImageStatus,
}

/// Result of one product build, successful or not.
#[derive(Debug)]
pub(crate) struct IngestionOutcome {
    pub sku: Option<String>,
    pub source_id: Option<String>,
    pub name: String,
    /// Set once the product itself exists remotely, including on later failure.
    pub product_id: Option<EntityId>,
    pub result: Result<BuildSummary, BuildError>,
}

impl IngestionOutcome {
    pub(crate) fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub(crate) fn label(&self) -> &str {
        self.sku.as_deref().unwrap_or("<no sku>")
    }
}

/// Builds products against a [`CatalogApi`] using a fixed [`SchemaContext`].
pub(crate) struct EntityBuilder<'a, A> {
    api: &'a A,
    images: &'a ImageFetcher,
    schema: &'a SchemaContext,
    image_policy: ImageFailurePolicy,
}

impl<'a, A: CatalogApi> EntityBuilder<'a, A> {
    pub(crate) fn new(
        api: &'a A,
        images: &'a ImageFetcher,
        schema: &'a SchemaContext,
        image_policy: ImageFailurePolicy,
    ) -> Self {
        Self {
            api,
            images,
            schema,
            image_policy,
        }
    }

    /// Runs every step for `product`. Never fails: errors are captured in
    /// the returned outcome.
    pub(crate) async fn build(&self, product: &LogicalProduct) -> IngestionOutcome {
        let primary = product.primary();
        let mut product_id = None;
        let result = self.run_steps(product, &mut product_id).await;

        match &result {
            Ok(summary) => tracing::info!(
                sku = product.label(),
                product_id = product_id.as_deref().unwrap_or_default(),
                variants = summary.variants_created,
                image = ?summary.image,
                "product loaded"
            ),
            Err(e) => tracing::error!(
                sku = product.label(),
                source_id = primary.id.as_deref().unwrap_or_default(),
                name = %primary.name,
                error = %e,
                "product load failed"
            ),
        }

        IngestionOutcome {
            sku: product.sku().map(str::to_owned),
            source_id: primary.id.clone(),
            name: primary.name.clone(),
            product_id,
            result,
        }
    }

    async fn run_steps(
        &self,
        product: &LogicalProduct,
        created: &mut Option<EntityId>,
    ) -> Result<BuildSummary, BuildError> {
        let primary = product.primary();
        // Prices are checked before anything is created remotely.
        let priced = self.priced_members(product)?;

        let attributes = mapping::map_attributes(primary, &self.schema.attributes);
        let description =
            mapping::rich_text_description(primary.description.as_deref().unwrap_or_default());
        let product_id = self
            .api
            .create_product(ProductInput {
                product_type_id: &self.schema.product_type_id,
                name: &primary.name,
                description: &description,
                category_id: &self.schema.category_id,
                attributes: &attributes,
            })
            .await
            .map_err(at(BuildStep::CreateProduct))?;
        *created = Some(product_id.clone());

        let metadata = mapping::map_metadata(primary, &self.schema.metadata_keys);
        if !metadata.is_empty() {
            self.api
                .update_metadata(&product_id, &metadata)
                .await
                .map_err(at(BuildStep::ProductMetadata))?;
        }

        self.api
            .publish_product(&product_id, &self.schema.channel_id)
            .await
            .map_err(at(BuildStep::PublishProduct))?;

        for (record, price) in &priced {
            self.create_variant(&product_id, record, *price).await?;
        }

        let image = self.attach_image(&product_id, product.image_url()).await?;

        Ok(BuildSummary {
            variants_created: priced.len(),
            image,
        })
    }

    /// Member records that get a variant, with their rounded prices. The
    /// variant-less schema takes only the first priced member.
    fn priced_members<'p>(
        &self,
        product: &'p LogicalProduct,
    ) -> Result<Vec<(&'p RawRecord, Decimal)>, BuildError> {
        let mut priced = Vec::new();
        for record in product.records() {
            let price = parse_price(record.price.as_ref()).map_err(|source| {
                BuildError::InvalidPrice {
                    record: record_label(record),
                    source,
                }
            })?;
            if let Some(price) = price {
                priced.push((record, price));
                if !self.schema.has_variants {
                    break;
                }
            }
        }
        Ok(priced)
    }

    async fn create_variant(
        &self,
        product_id: &str,
        record: &RawRecord,
        price: Decimal,
    ) -> Result<(), BuildError> {
        let sku = mapping::variant_sku(record, self.schema.has_variants);
        let attributes = mapping::vendor_attribute(record, self.schema);
        let variant_id = self
            .api
            .create_variant(VariantInput {
                product_id,
                sku: &sku,
                attributes: &attributes,
            })
            .await
            .map_err(at(BuildStep::CreateVariant))?;

        self.api
            .update_variant_listing(&variant_id, &self.schema.channel_id, price)
            .await
            .map_err(at(BuildStep::VariantListing))?;

        let metadata = mapping::variant_metadata(record);
        if !metadata.is_empty() {
            self.api
                .update_metadata(&variant_id, &metadata)
                .await
                .map_err(at(BuildStep::VariantMetadata))?;
        }

        tracing::debug!(product_id, variant_id = %variant_id, sku = %sku, %price, "variant created");
        Ok(())
    }

    async fn attach_image(
        &self,
        product_id: &str,
        url: Option<&str>,
    ) -> Result<ImageStatus, BuildError> {
        let Some(url) = url else {
            return Ok(ImageStatus::NoImage);
        };

        let image = match self.images.fetch(url).await {
            Ok(image) => image,
            Err(e) if self.image_policy == ImageFailurePolicy::Skip => {
                tracing::warn!(product_id, url, error = %e, "image fetch failed, continuing without image");
                return Ok(ImageStatus::Skipped);
            }
            Err(e) => return Err(BuildError::Image(e)),
        };

        // `image` owns the temporary file until the end of this scope.
        self.api
            .upload_product_image(product_id, image.path())
            .await
            .map_err(at(BuildStep::UploadImage))?;

        Ok(ImageStatus::Uploaded)
    }
}

fn record_label(record: &RawRecord) -> String {
    match (&record.sku, &record.vendor) {
        (Some(sku), Some(vendor)) => format!("{sku}/{vendor}"),
        (Some(sku), None) => sku.clone(),
        (None, _) => record.id.clone().unwrap_or_else(|| "<unidentified>".to_string()),
    }
}

#[cfg(test)]
#[path = "builder_test.rs"]
mod tests;
