pub mod catalog;
pub mod client;
pub mod error;
pub mod image;

pub use catalog::{CatalogApi, EntityId, ProductInput, ProductTypeInput, VariantInput};
pub use client::GraphqlCatalogClient;
pub use error::{ApiError, ImageError};
pub use image::{FetchedImage, ImageFetcher};
