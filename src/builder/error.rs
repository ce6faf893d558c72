//! Configuration errors for the form config builder.

use crate::schema::SchemaError;
use thiserror::Error;

/// Errors that can occur when building a form configuration.
///
/// These are programmer errors: a form with an invalid configuration is
/// never constructed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Submit handler not specified. Call .on_submit(handler) before .build()")]
    MissingSubmitHandler,

    #[error("Async validator registered for unknown field '{field}'")]
    UnknownValidatorField { field: String },

    #[error("Async validator registered more than once for field '{field}'")]
    DuplicateValidator { field: String },

    #[error("Schema constrains unknown field '{field}'")]
    UnknownSchemaField { field: String },

    #[error("Field '{field}' is listed more than once")]
    DuplicateField { field: String },

    #[error(transparent)]
    SchemaRejected(#[from] SchemaError),

    #[error("Invalid form options: {0}")]
    InvalidOptions(#[from] serde_json::Error),
}
