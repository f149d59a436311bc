//! Console and JSON reporting for load runs.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::Context;
use catload_core::price::parse_price;
use catload_core::LogicalProduct;
use serde::Serialize;

use super::builder::{ImageStatus, IngestionOutcome};

/// Totals over every outcome of a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(super) struct LoadSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub variants: usize,
    pub images: usize,
}

pub(super) fn summarize(outcomes: &[IngestionOutcome]) -> LoadSummary {
    outcomes
        .iter()
        .fold(LoadSummary::default(), |mut summary, outcome| {
            match &outcome.result {
                Ok(built) => {
                    summary.succeeded += 1;
                    summary.variants += built.variants_created;
                    if built.image == ImageStatus::Uploaded {
                        summary.images += 1;
                    }
                }
                Err(_) => summary.failed += 1,
            }
            summary
        })
}

fn image_label(status: ImageStatus) -> &'static str {
    match status {
        ImageStatus::Uploaded => "uploaded",
        ImageStatus::NoImage => "none",
        ImageStatus::Skipped => "skipped",
    }
}

/// One line per product: `✓` for success, `✗` with the reason otherwise.
pub(super) fn print_outcomes(outcomes: &[IngestionOutcome]) {
    for outcome in outcomes {
        match &outcome.result {
            Ok(built) => println!(
                "  \u{2713} {:<20} {} ({} variants, image {})",
                outcome.label(),
                outcome.name,
                built.variants_created,
                image_label(built.image)
            ),
            Err(e) => println!("  \u{2717} {:<20} {} - {e}", outcome.label(), outcome.name),
        }
    }
}

pub(super) fn print_summary(summary: &LoadSummary) {
    println!(
        "\nLoad complete: {} products loaded, {} failed ({} variants, {} images)",
        summary.succeeded, summary.failed, summary.variants, summary.images
    );
}

#[derive(Debug, Serialize)]
struct ReportEntry<'a> {
    sku: Option<&'a str>,
    source_id: Option<&'a str>,
    name: &'a str,
    status: &'static str,
    /// Present on failures too when the product was created before the
    /// failing step; such products need manual cleanup.
    product_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    variants_created: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    succeeded: usize,
    failed: usize,
    products: Vec<ReportEntry<'a>>,
}

fn report_entry(outcome: &IngestionOutcome) -> ReportEntry<'_> {
    let (status, variants_created, image, error) = match &outcome.result {
        Ok(built) => (
            "ok",
            Some(built.variants_created),
            Some(image_label(built.image)),
            None,
        ),
        Err(e) => ("failed", None, None, Some(e.to_string())),
    };
    ReportEntry {
        sku: outcome.sku.as_deref(),
        source_id: outcome.source_id.as_deref(),
        name: &outcome.name,
        status,
        product_id: outcome.product_id.as_deref(),
        variants_created,
        image,
        error,
    }
}

/// Writes a machine-readable JSON report of every outcome to `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub(super) fn write_report(path: &Path, outcomes: &[IngestionOutcome]) -> anyhow::Result<()> {
    let summary = summarize(outcomes);
    let report = Report {
        succeeded: summary.succeeded,
        failed: summary.failed,
        products: outcomes.iter().map(report_entry).collect(),
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create report file {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &report)
        .with_context(|| format!("failed to write report file {}", path.display()))?;
    Ok(())
}

/// Prints what a load would create without contacting the catalog.
pub(super) fn print_preview(products: &[LogicalProduct], has_variants: bool) {
    let mut variants = 0usize;
    let mut invalid = 0usize;
    for product in products {
        let mut priced = 0usize;
        let mut bad_price = false;
        for record in product.records() {
            match parse_price(record.price.as_ref()) {
                Ok(Some(_)) => priced += 1,
                Ok(None) => {}
                Err(_) => bad_price = true,
            }
        }
        if !has_variants {
            priced = priced.min(1);
        }
        let image = product.image_url().unwrap_or("no image");
        if bad_price {
            invalid += 1;
            println!(
                "  \u{2717} {:<20} {} - invalid price",
                product.label(),
                product.primary().name
            );
        } else {
            variants += priced;
            println!(
                "  - {:<20} {} ({} records, {} variants) {image}",
                product.label(),
                product.primary().name,
                product.records().len(),
                priced
            );
        }
    }
    println!(
        "\n[dry-run] {} products, {} variants would be created; {} products have invalid prices",
        products.len() - invalid,
        variants,
        invalid
    );
}

#[cfg(test)]
mod tests {
    use catload_api::ApiError;

    use super::super::builder::{BuildError, BuildStep, BuildSummary};
    use super::*;

    fn ok(sku: &str, variants: usize, image: ImageStatus) -> IngestionOutcome {
        IngestionOutcome {
            sku: Some(sku.into()),
            source_id: Some(format!("id-{sku}")),
            name: format!("Product {sku}"),
            product_id: Some(format!("prod-{sku}")),
            result: Ok(BuildSummary {
                variants_created: variants,
                image,
            }),
        }
    }

    fn failed(sku: &str, product_id: Option<&str>) -> IngestionOutcome {
        IngestionOutcome {
            sku: Some(sku.into()),
            source_id: None,
            name: format!("Product {sku}"),
            product_id: product_id.map(str::to_owned),
            result: Err(BuildError::Api {
                step: BuildStep::PublishProduct,
                source: ApiError::Mutation {
                    operation: "productChannelListingUpdate".into(),
                    message: "channel: not found".into(),
                },
            }),
        }
    }

    #[test]
    fn summarize_counts_successes_and_failures() {
        let outcomes = vec![
            ok("A", 2, ImageStatus::Uploaded),
            failed("B", Some("prod-B")),
            ok("C", 1, ImageStatus::NoImage),
        ];

        assert_eq!(
            summarize(&outcomes),
            LoadSummary {
                succeeded: 2,
                failed: 1,
                variants: 3,
                images: 1,
            }
        );
    }

    #[test]
    fn summarize_empty_is_zero() {
        assert_eq!(summarize(&[]), LoadSummary::default());
    }

    #[test]
    fn report_lists_failures_with_partial_product_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let outcomes = vec![ok("A", 2, ImageStatus::Skipped), failed("B", Some("prod-B"))];

        write_report(&path, &outcomes).unwrap();

        let report: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(report["succeeded"], 1);
        assert_eq!(report["failed"], 1);

        let products = report["products"].as_array().unwrap();
        assert_eq!(products[0]["status"], "ok");
        assert_eq!(products[0]["variants_created"], 2);
        assert_eq!(products[0]["image"], "skipped");
        assert!(products[0].get("error").is_none());

        assert_eq!(products[1]["status"], "failed");
        assert_eq!(products[1]["product_id"], "prod-B");
        assert!(products[1]["source_id"].is_null());
        assert_eq!(
            products[1]["error"],
            "publish product failed: productChannelListingUpdate rejected: channel: not found"
        );
    }

    #[test]
    fn report_to_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("report.json");
        let err = write_report(&path, &[]).unwrap_err();
        assert!(err.to_string().contains("failed to create report file"));
    }
}
