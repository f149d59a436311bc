use thiserror::Error;

/// Errors raised while loading environment or schema configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read schema file {path}: {source}")]
    SchemaFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse schema file: {0}")]
    SchemaFileParse(#[source] serde_yaml::Error),

    #[error("schema validation failed: {0}")]
    Validation(String),
}

/// Errors raised while reading the product dump.
#[derive(Debug, Error)]
pub enum DumpError {
    #[error("failed to read dump file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse dump file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A price field that could not be interpreted as a non-negative decimal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid price {raw:?}: {reason}")]
pub struct PriceError {
    pub raw: String,
    pub reason: String,
}
