use thiserror::Error;

/// Failures while locating or decoding the attribute container of a token.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MetadataError {
    /// No property exists at the configured index.
    #[error("Token has no property at index {0}")]
    MissingIndex(usize),

    /// No property carries the configured key.
    #[error("Token has no property named '{0}'")]
    MissingKey(String),

    /// The property exists but does not hold a valid attribute container.
    #[error("Malformed attribute container: {0}")]
    MalformedJson(String),
}
