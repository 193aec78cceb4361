//! Error types for parsing wire values.

use thiserror::Error;

/// Returned when a string does not name a known web-vitals value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown web-vitals metric: {0}")]
    UnknownMetric(String),
    #[error("unknown web-vitals rating: {0}")]
    UnknownRating(String),
}
