//! Error types for the HTTP transport layer.
//!
//! These only arise while building a client. Requests themselves report
//! failures through the response envelope.

use uvipay::ConfigError;

/// Errors that can occur while configuring an HTTP-backed client.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// The private key is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The base URL could not be parsed.
    #[error("invalid base URL `{url}`: {source}")]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },

    /// The base URL parsed but cannot be used as an API root.
    #[error("unsupported base URL `{0}`: must be http(s) with a host and no query")]
    UnsupportedBaseUrl(String),

    /// The `reqwest` client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// A required environment variable is not set.
    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),

    /// The timeout is not a positive whole number of seconds.
    #[error("invalid timeout `{0}`: expected a positive number of seconds")]
    InvalidTimeout(String),
}
