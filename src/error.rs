//! Error types.
//!
//! [`DeliveryError`] never escapes `dispatch`; it only reaches the debug sink.
//! [`ConfigError`] is the one error a host sees, at startup.

use thiserror::Error;

/// Why an event did not reach the endpoint.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The request could not be completed (DNS, refused connection, timeout).
    #[error("network error: {0}")]
    Transport(String),

    /// The endpoint answered with a non-success status.
    #[error("HTTP error! status: {status}")]
    Status { status: u16 },

    #[error("failed to encode event: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Invalid analytics configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid endpoint '{endpoint}': {source}")]
    InvalidEndpoint {
        endpoint: String,
        source: url::ParseError,
    },

    #[error("invalid header name '{0}'")]
    InvalidHeaderName(String),

    #[error("invalid value for header '{0}'")]
    InvalidHeaderValue(String),

    #[error("missing environment variable {0}")]
    MissingVar(&'static str),

    #[error("malformed header entry '{0}', expected Name=value")]
    MalformedHeaders(String),
}
