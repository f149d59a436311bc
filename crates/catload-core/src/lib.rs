//! Pure ingestion logic for catalog loading: configuration, the record
//! model, grouping into logical products, and field mapping.

pub mod app_config;
pub mod config;
pub mod context;
pub mod error;
pub mod grouping;
pub mod mapping;
pub mod price;
pub mod records;
pub mod schema;

pub use app_config::{AppConfig, ImageFailurePolicy};
pub use config::{load_app_config, load_app_config_from_env, DEFAULT_MAX_CONCURRENT_BUILDS};
pub use context::{AttributeSpec, SchemaContext};
pub use error::{ConfigError, DumpError, PriceError};
pub use grouping::{group_records, LogicalProduct};
pub use mapping::{AttributeValue, MetadataItem};
pub use records::{load_records, RawRecord};
pub use schema::{load_schema, AttributeConfig, SchemaConfig};
