//! Formstate: a deterministic form state engine
//!
//! Formstate follows a "pure core, imperative shell" design. Every user
//! interaction and every completion of asynchronous work is an action; a
//! pure reducer turns `(state, action)` into the next state, and a pure
//! planner derives the asynchronous work that transition requires. The
//! engine driver is the only place that spawns tasks or keeps time.
//!
//! # Core Concepts
//!
//! - **Typed records**: forms are plain structs implementing `FormData`,
//!   with an enum of field keys declared through `field_enum!`
//! - **Schemas**: synchronous whole-record validation, recomputed on every
//!   mutating action
//! - **Epochs**: per-field counters that make out-of-order async validation
//!   results inert
//! - **Submission**: non-reentrant, numbered, and blocked while fields are
//!   invalid or still validating
//!
//! # Example
//!
//! ```rust
//! use formstate::core::{FormAction, FormData};
//! use formstate::schema::SchemaBuilder;
//! use formstate::{field_enum, reduce, FormConfig, ValidationMode};
//! use serde::{Deserialize, Serialize};
//!
//! field_enum! {
//!     pub enum SignupField {
//!         Email,
//!     }
//! }
//!
//! #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
//! struct Signup {
//!     email: String,
//! }
//!
//! impl FormData for Signup {
//!     type Field = SignupField;
//!     type Value = String;
//!
//!     fn get(&self, _field: SignupField) -> String {
//!         self.email.clone()
//!     }
//!
//!     fn set(&mut self, _field: SignupField, value: String) {
//!         self.email = value;
//!     }
//! }
//!
//! let config = FormConfig::builder(Signup::default())
//!     .schema(
//!         SchemaBuilder::<Signup>::new()
//!             .require_value(SignupField::Email, |v: &String| v.contains('@'), "Invalid email")
//!             .build(),
//!     )
//!     .mode(ValidationMode::OnBlur)
//!     .on_submit(|_signup: Signup| async { Ok::<(), String>(()) })
//!     .build()
//!     .unwrap();
//!
//! let state = reduce(
//!     &config,
//!     &config.initial_state(),
//!     FormAction::SetField {
//!         field: SignupField::Email,
//!         value: "bad".to_string(),
//!     },
//! );
//! assert_eq!(state.field_errors(SignupField::Email), &["Invalid email".to_string()]);
//! ```

pub mod builder;
pub mod core;
pub mod effects;
pub mod engine;
pub mod schema;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use crate::builder::{ConfigError, FormConfig, FormConfigBuilder, FormOptions, ValidationMode};
pub use crate::core::{
    reduce, Epoch, Field, FieldErrors, FormAction, FormData, FormState, StatusHistory,
    SubmitOutcome, SubmitStatus,
};
pub use crate::effects::{plan, transition, FormEffect, ValidationTrigger};
pub use crate::engine::{EngineError, FormEngine};
pub use crate::schema::{RuleSchema, Schema, SchemaBuilder};
