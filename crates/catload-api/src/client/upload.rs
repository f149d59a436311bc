//! Multipart request bodies for GraphQL file uploads.
//!
//! Follows the GraphQL multipart request convention: an `operations` part
//! with the query and `null` in place of the file, a `map` part pointing
//! part `0` at that variable, and the file itself as part `0`.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use serde_json::json;

use crate::error::ApiError;

use super::documents::Operation;

pub(super) async fn media_form(
    operation: &Operation,
    product_id: &str,
    image: &Path,
) -> Result<Form, ApiError> {
    let bytes = tokio::fs::read(image).await.map_err(|e| ApiError::Io {
        path: image.display().to_string(),
        source: e,
    })?;

    let file_name = image
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image.jpg")
        .to_owned();

    let operations = json!({
        "query": operation.document,
        "variables": { "product": product_id, "image": null },
    });
    let map = json!({ "0": ["variables.image"] });

    let file = Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(mime_for(image))?;

    Ok(Form::new()
        .text("operations", operations.to_string())
        .text("map", map.to_string())
        .part("0", file))
}

pub(super) fn mime_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("avif") => "image/avif",
        Some("jpg" | "jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}
