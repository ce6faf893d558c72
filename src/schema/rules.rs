//! Rule-based schema using Validation.

use crate::core::{FieldErrors, FormData};
use crate::schema::Schema;
use std::collections::BTreeMap;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Type alias for rule check functions.
pub type FieldCheck<T> =
    Box<dyn Fn(&T) -> Validation<(), NonEmptyVec<String>> + Send + Sync>;

pub(crate) struct FieldRule<T: FormData> {
    pub(crate) field: T::Field,
    pub(crate) check: FieldCheck<T>,
}

/// Schema built from per-field rules.
/// Uses Validation to accumulate ALL failing rules of a field.
pub struct RuleSchema<T: FormData> {
    pub(crate) rules: Vec<FieldRule<T>>,
}

impl<T: FormData> RuleSchema<T> {
    /// Evaluate every rule, grouping messages by field in registration order.
    pub fn evaluate(&self, data: &T) -> BTreeMap<T::Field, Validation<(), NonEmptyVec<String>>> {
        let mut grouped: BTreeMap<T::Field, Vec<Validation<(), NonEmptyVec<String>>>> =
            BTreeMap::new();
        for rule in &self.rules {
            grouped.entry(rule.field).or_default().push((rule.check)(data));
        }

        grouped
            .into_iter()
            .map(|(field, checks)| (field, Validation::all_vec(checks).map(|_| ())))
            .collect()
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

impl<T: FormData> Schema<T> for RuleSchema<T> {
    fn validate(&self, data: &T) -> FieldErrors<T::Field> {
        self.evaluate(data)
            .into_iter()
            .filter_map(|(field, result)| match result {
                Validation::Success(_) => None,
                Validation::Failure(errors) => Some((field, errors.iter().cloned().collect())),
            })
            .collect()
    }

    fn fields(&self) -> Vec<T::Field> {
        let mut fields: Vec<T::Field> = self.rules.iter().map(|rule| rule.field).collect();
        fields.sort();
        fields.dedup();
        fields
    }
}
