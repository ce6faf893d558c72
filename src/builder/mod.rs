//! Builder API for form configuration.
//!
//! This module provides the fluent [`FormConfigBuilder`], serializable
//! [`FormOptions`], and the `field_enum!` macro for declaring field keys
//! with minimal boilerplate.

pub mod config;
pub mod error;
pub mod macros;

pub use config::{
    FormConfig, FormConfigBuilder, FormOptions, ValidationMode, DEFAULT_ASYNC_DEBOUNCE_MS,
    DEFAULT_HISTORY_LIMIT,
};
pub use error::ConfigError;
