use thiserror::Error;

/// Errors returned while retrieving or decoding a feed.
///
/// Any of these fails the whole session load; individually malformed rows
/// are not errors and are skipped during parsing.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Network or TLS failure, or a non-2xx status, from the HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A local feed file could not be read.
    #[error("failed to read feed file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The configured feed URL could not be parsed.
    #[error("invalid feed URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The portal answered with a Socrata error object.
    #[error("open data API error for {context}: {message}")]
    Api { context: String, message: String },

    /// The response body was not valid JSON.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The body was JSON but not an array of rows.
    #[error("expected a JSON array of rows from {context}, found {found}")]
    UnexpectedShape { context: String, found: &'static str },
}
