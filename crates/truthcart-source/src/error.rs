use thiserror::Error;

/// Errors returned by signal source implementations.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Network, TLS, timeout, or non-2xx failure from the HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured aggregation endpoint is not a valid URL.
    #[error("invalid source URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The response body could not be deserialized into a signal batch.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A file-backed batch could not be read.
    #[error("failed to read signal batch from {path}: {source}")]
    FileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// No signal source is configured for this process.
    #[error("no signal source is configured")]
    Disabled,
}
