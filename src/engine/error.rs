//! Engine error types.

use thiserror::Error;

/// Errors that can occur when starting a form engine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    /// The engine spawns validators and submit handlers onto the current
    /// Tokio runtime.
    #[error("Form engine must be created inside a Tokio runtime")]
    NoRuntime,
}
