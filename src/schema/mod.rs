//! Schema adapters: synchronous, whole-record validation.
//!
//! A schema maps a complete candidate record to ordered error messages per
//! field. Because it always sees the whole record, cross-field rules
//! ("passwords must match") are expressed naturally.
//!
//! Rule-based schemas use Stillwater's `Validation` to accumulate every
//! failing rule of a field instead of stopping at the first one.
//!
//! # Example
//!
//! ```rust
//! use formstate::core::FormData;
//! use formstate::field_enum;
//! use formstate::schema::{Schema, SchemaBuilder};
//! use serde::{Deserialize, Serialize};
//!
//! field_enum! {
//!     pub enum LoginField {
//!         Username,
//!     }
//! }
//!
//! #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
//! struct Login {
//!     username: String,
//! }
//!
//! impl FormData for Login {
//!     type Field = LoginField;
//!     type Value = String;
//!
//!     fn get(&self, _field: LoginField) -> String {
//!         self.username.clone()
//!     }
//!
//!     fn set(&mut self, _field: LoginField, value: String) {
//!         self.username = value;
//!     }
//! }
//!
//! let schema = SchemaBuilder::<Login>::new()
//!     .require_value(LoginField::Username, |v: &String| !v.is_empty(), "Username is required")
//!     .require_value(LoginField::Username, |v: &String| v.len() >= 3, "Username is too short")
//!     .build();
//!
//! let errors = schema.validate(&Login::default());
//! assert_eq!(errors[&LoginField::Username].len(), 2);
//! ```

pub mod builder;
pub mod error;
pub mod rules;

pub use builder::SchemaBuilder;
pub use error::SchemaError;
pub use rules::{FieldCheck, RuleSchema};

use crate::core::{normalize_errors, FieldErrors, FormData};

/// Synchronous validation over a full record.
///
/// Implementations must be pure: the same record always yields the same
/// errors, and nothing else happens.
pub trait Schema<T: FormData>: Send + Sync {
    /// Error messages per field. Fields missing from the map are valid.
    fn validate(&self, data: &T) -> FieldErrors<T::Field>;

    /// Reject records the schema cannot work with at all.
    ///
    /// Called once at configuration time with the initial record; a failure
    /// is a configuration error, not a validation error.
    fn check(&self, _sample: &T) -> Result<(), SchemaError> {
        Ok(())
    }

    /// Fields the schema places constraints on.
    fn fields(&self) -> Vec<T::Field> {
        Vec::new()
    }
}

/// Schema that accepts every record.
#[derive(Clone, Copy, Debug, Default)]
pub struct AcceptAll;

impl<T: FormData> Schema<T> for AcceptAll {
    fn validate(&self, _data: &T) -> FieldErrors<T::Field> {
        FieldErrors::new()
    }
}

/// Adapter turning a plain function into a [`Schema`].
#[derive(Clone, Copy, Debug)]
pub struct FnSchema<F>(pub F);

impl<T, F> Schema<T> for FnSchema<F>
where
    T: FormData,
    F: Fn(&T) -> FieldErrors<T::Field> + Send + Sync,
{
    fn validate(&self, data: &T) -> FieldErrors<T::Field> {
        (self.0)(data)
    }
}

/// Run a schema and keep only fields that actually have errors.
pub(crate) fn run<T: FormData>(schema: &dyn Schema<T>, data: &T) -> FieldErrors<T::Field> {
    normalize_errors(schema.validate(data))
}
