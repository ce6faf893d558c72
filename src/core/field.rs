//! Field keys and typed form records.
//!
//! A form is a fully populated record `T: FormData`. Every field of the
//! record is addressed by a small `Copy` key implementing [`Field`], and
//! every field value shares the record's `Value` type.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Key identifying one field of a form record.
///
/// Fields are usually unit enums generated by [`field_enum!`](crate::field_enum).
///
/// # Example
///
/// ```rust
/// use formstate::core::Field;
/// use formstate::field_enum;
///
/// field_enum! {
///     pub enum LoginField {
///         Username,
///         Password,
///     }
/// }
///
/// assert_eq!(LoginField::Username.name(), "Username");
/// assert_eq!(LoginField::all().len(), 2);
/// ```
pub trait Field:
    Copy + Ord + Hash + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Field name for display and logging.
    fn name(&self) -> &'static str;

    /// Every field of this key type, in declaration order.
    fn all() -> &'static [Self];
}

/// A typed record of field values.
///
/// Implementations must keep the record fully populated: `get` returns a
/// value for every field listed by `fields`.
pub trait FormData:
    Clone + PartialEq + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    type Field: Field;
    type Value: Clone + PartialEq + Debug + Send + Sync + 'static;

    /// The full field set of the record.
    fn fields() -> &'static [Self::Field] {
        Self::Field::all()
    }

    fn get(&self, field: Self::Field) -> Self::Value;

    fn set(&mut self, field: Self::Field, value: Self::Value);
}

/// Ordered error messages per field. A field that is absent is valid.
pub type FieldErrors<F> = BTreeMap<F, Vec<String>>;

/// Drop empty error lists so that "absent" is the only way to be valid.
pub fn normalize_errors<F: Field>(errors: FieldErrors<F>) -> FieldErrors<F> {
    errors
        .into_iter()
        .filter(|(_, messages)| !messages.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ContactField, ContactForm};

    #[test]
    fn fields_default_to_all_keys() {
        assert_eq!(ContactForm::fields(), ContactField::all());
        assert_eq!(ContactForm::fields().len(), 3);
    }

    #[test]
    fn get_and_set_round_through_record() {
        let mut form = ContactForm::default();
        form.set(ContactField::Email, "a@b.com".to_string());

        assert_eq!(form.get(ContactField::Email), "a@b.com");
        assert_eq!(form.email, "a@b.com");
    }

    #[test]
    fn normalize_drops_empty_lists() {
        let mut errors = FieldErrors::new();
        errors.insert(ContactField::Name, Vec::new());
        errors.insert(ContactField::Email, vec!["bad".to_string()]);

        let errors = normalize_errors(errors);

        assert!(!errors.contains_key(&ContactField::Name));
        assert_eq!(errors[&ContactField::Email], vec!["bad".to_string()]);
    }
}
