//! Error types for the value model

use thiserror::Error;

/// Result type for value model operations
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised by the value model, JSON ingestion and singleton coercion
#[derive(Error, Debug)]
pub enum ModelError {
    /// A singleton was required but the collection holds more than one item
    #[error("expected single {expected}, got collection of {actual} items")]
    Cardinality {
        /// Requested system type
        expected: String,
        /// Number of items found
        actual: usize,
    },

    /// A singleton has the wrong shape, namespace or concrete type
    #[error("type error: expected {expected}, got {actual}")]
    Type {
        /// Requested type
        expected: String,
        /// Type found
        actual: String,
    },

    /// A path key could not be parsed
    #[error("invalid path '{path}': {reason}")]
    InvalidPath {
        /// Offending key text
        path: String,
        /// What is wrong with it
        reason: String,
    },

    /// A JSON number cannot be represented as Integer or Decimal
    #[error("unsupported number {literal} at {path}")]
    UnsupportedNumber {
        /// Path of the number inside the document
        path: String,
        /// Number as written in the JSON text
        literal: String,
    },

    /// The document has no usable `resourceType`
    #[error("missing resourceType in document")]
    MissingResourceType,

    /// The document is not valid JSON
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
