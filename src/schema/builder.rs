//! Builder API for creating rule-based schemas.

use crate::core::FormData;
use crate::schema::rules::{FieldCheck, FieldRule, RuleSchema};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Builder for creating rule-based schemas
pub struct SchemaBuilder<T: FormData> {
    rules: Vec<FieldRule<T>>,
}

impl<T: FormData> SchemaBuilder<T> {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a custom validation check for a field
    pub fn require<F>(mut self, field: T::Field, check: F) -> Self
    where
        F: Fn(&T) -> Validation<(), NonEmptyVec<String>> + Send + Sync + 'static,
    {
        let check: FieldCheck<T> = Box::new(check);
        self.rules.push(FieldRule { field, check });
        self
    }

    /// Add a predicate over the whole record with an error message
    pub fn require_pred<F>(self, field: T::Field, predicate: F, message: impl Into<String>) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let message = message.into();
        self.require(field, move |data: &T| {
            if predicate(data) {
                Validation::success(())
            } else {
                Validation::fail(message.clone())
            }
        })
    }

    /// Add a predicate over the field's own value with an error message
    pub fn require_value<F>(self, field: T::Field, predicate: F, message: impl Into<String>) -> Self
    where
        F: Fn(&T::Value) -> bool + Send + Sync + 'static,
    {
        self.require_pred(field, move |data: &T| predicate(&data.get(field)), message)
    }

    /// Build the schema
    pub fn build(self) -> RuleSchema<T> {
        RuleSchema { rules: self.rules }
    }
}

impl<T: FormData> Default for SchemaBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
