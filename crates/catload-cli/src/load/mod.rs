//! The `load` command: dump file to remote catalog.
//!
//! Bootstrap failures abort the run. After bootstrap, each product is built
//! independently; one product failing never stops the others.

mod bootstrap;
mod builder;
mod report;
mod runner;

#[cfg(test)]
mod fake;

use std::path::PathBuf;

use anyhow::Context;
use catload_api::{CatalogApi, GraphqlCatalogClient, ImageFetcher};
use catload_core::{
    group_records, load_app_config, load_records, load_schema, ImageFailurePolicy,
    LogicalProduct, SchemaConfig, SchemaContext,
};
use clap::Args;

use builder::{EntityBuilder, IngestionOutcome};

#[derive(Debug, Args)]
pub struct LoadArgs {
    /// Path to the product dump (JSON array of records)
    #[arg(long, env = "CATLOAD_DUMP_PATH", default_value = "algolia-dump.json")]
    pub dump: PathBuf,

    /// Path to the catalog schema definition
    #[arg(long, env = "CATLOAD_SCHEMA_PATH", default_value = "config/schema.yaml")]
    pub schema: PathBuf,

    /// Maximum number of products built concurrently (overrides
    /// CATLOAD_MAX_CONCURRENT_BUILDS)
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Group and validate the dump without contacting the catalog
    #[arg(long)]
    pub dry_run: bool,

    /// Write a JSON report of every product outcome to this path
    #[arg(long)]
    pub report: Option<PathBuf>,
}

/// Runs the full load: read inputs, bootstrap the schema, build every
/// product, activate the channel.
///
/// # Errors
///
/// Returns an error if the inputs cannot be read, configuration is invalid,
/// bootstrap or channel activation fails, or every product failed.
pub(crate) async fn run_load(args: &LoadArgs) -> anyhow::Result<()> {
    let schema = load_schema(&args.schema)
        .with_context(|| format!("failed to load schema from {}", args.schema.display()))?;
    let records = load_records(&args.dump)
        .with_context(|| format!("failed to load dump from {}", args.dump.display()))?;
    let record_count = records.len();
    let products = group_records(records);
    tracing::info!(
        records = record_count,
        products = products.len(),
        "grouped dump records"
    );

    if args.dry_run {
        report::print_preview(&products, schema.product_type.has_variants);
        return Ok(());
    }

    let config = load_app_config().context("failed to load configuration")?;
    let max_concurrent = args
        .concurrency
        .unwrap_or(config.max_concurrent_builds)
        .max(1);
    let client = GraphqlCatalogClient::new(
        &config.graphql_url,
        &config.auth_token,
        config.request_timeout_secs,
        &config.user_agent,
    )
    .context("failed to build catalog client")?;
    let images = ImageFetcher::new(
        config.image_timeout_secs,
        &config.user_agent,
        config.image_max_bytes,
    )
    .context("failed to build image fetcher")?;

    println!(
        "Loading {} products from {} ({} concurrent)...",
        products.len(),
        args.dump.display(),
        max_concurrent
    );

    tracing::info!(
        image_policy = %config.image_failure_policy,
        max_concurrent,
        "starting load"
    );

    let IngestionRun {
        outcomes,
        activation,
    } = ingest(
        &client,
        &images,
        &schema,
        &products,
        config.image_failure_policy,
        max_concurrent,
    )
    .await?;

    // Outcomes are reported even when activation failed; the report lists
    // products needing cleanup.
    report::print_outcomes(&outcomes);
    if let Some(path) = &args.report {
        report::write_report(path, &outcomes)?;
        println!("Report written to {}", path.display());
    }

    let summary = report::summarize(&outcomes);
    report::print_summary(&summary);

    activation?;
    println!("Channel activated");

    if summary.failed > 0 {
        tracing::warn!(
            failed = summary.failed,
            total = outcomes.len(),
            "some products failed to load"
        );
    }
    if summary.succeeded == 0 && summary.failed > 0 {
        anyhow::bail!("all {} products failed to load", summary.failed);
    }

    Ok(())
}

/// Outcomes of every build plus the result of the final channel activation.
#[derive(Debug)]
struct IngestionRun {
    outcomes: Vec<IngestionOutcome>,
    activation: anyhow::Result<()>,
}

/// Bootstrap, build every product, then activate the channel.
///
/// Only a bootstrap failure is returned as `Err`; an activation failure is
/// carried in [`IngestionRun::activation`] alongside the outcomes.
async fn ingest<A: CatalogApi>(
    api: &A,
    images: &ImageFetcher,
    schema: &SchemaConfig,
    products: &[LogicalProduct],
    image_policy: ImageFailurePolicy,
    max_concurrent: usize,
) -> anyhow::Result<IngestionRun> {
    let context = bootstrap::bootstrap(api, schema)
        .await
        .context("catalog bootstrap failed")?;

    let outcomes = load_products(api, images, &context, products, image_policy, max_concurrent).await;

    let activation = api
        .activate_channel(&context.channel_id)
        .await
        .context("failed to activate channel");
    match &activation {
        Ok(()) => tracing::info!(channel_id = %context.channel_id, "channel activated"),
        Err(e) => tracing::error!(channel_id = %context.channel_id, error = %e, "channel activation failed"),
    }

    Ok(IngestionRun {
        outcomes,
        activation,
    })
}

async fn load_products<A: CatalogApi>(
    api: &A,
    images: &ImageFetcher,
    context: &SchemaContext,
    products: &[LogicalProduct],
    image_policy: ImageFailurePolicy,
    max_concurrent: usize,
) -> Vec<IngestionOutcome> {
    let builder = EntityBuilder::new(api, images, context, image_policy);
    runner::dispatch(products, max_concurrent, |product| builder.build(product)).await
}

#[cfg(test)]
#[path = "load_test.rs"]
mod tests;
