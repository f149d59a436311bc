use thiserror::Error;

/// Errors returned by the catalog GraphQL client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {operation}")]
    UnexpectedStatus { status: u16, operation: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Top-level `errors` array in the GraphQL response.
    #[error("GraphQL error in {operation}: {message}")]
    Graphql { operation: String, message: String },

    /// The mutation ran but returned validation errors in its payload.
    #[error("{operation} rejected: {message}")]
    Mutation { operation: String, message: String },

    #[error("{operation} response is missing {field}")]
    MissingField { operation: String, field: String },

    #[error("invalid endpoint URL \"{url}\": {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("failed to read upload file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors returned while fetching an image into a temporary file.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("HTTP error fetching image: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid image URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("image at {url} is empty")]
    EmptyBody { url: String },

    #[error("image at {url} exceeds {limit} bytes")]
    TooLarge { url: String, limit: u64 },

    #[error("failed to buffer image to a temporary file: {0}")]
    Io(#[from] std::io::Error),
}
