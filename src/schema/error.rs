//! Schema error types.

use thiserror::Error;

/// Errors raised by a schema about the record shape itself.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SchemaError {
    /// The schema cannot type-check records of this shape
    #[error("Schema rejected record: {0}")]
    Rejected(String),
}
