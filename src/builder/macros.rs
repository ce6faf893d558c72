//! Macros for declaring form fields.

/// Generate a field key enum and its [`Field`](crate::core::Field) implementation.
///
/// # Example
///
/// ```
/// use formstate::core::Field;
/// use formstate::field_enum;
///
/// field_enum! {
///     pub enum SignupField {
///         Username,
///         Email,
///         Password,
///     }
/// }
///
/// assert_eq!(SignupField::Email.name(), "Email");
/// assert_eq!(SignupField::all(), &[SignupField::Username, SignupField::Email, SignupField::Password]);
/// ```
#[macro_export]
macro_rules! field_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Debug,
            serde::Serialize,
            serde::Deserialize,
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::Field for $name {
            fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn all() -> &'static [Self] {
                &[$(Self::$variant),*]
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::Field;

    field_enum! {
        enum TestField {
            First,
            Second,
            Third,
        }
    }

    #[test]
    fn field_enum_macro_generates_trait() {
        assert_eq!(TestField::First.name(), "First");
        assert_eq!(TestField::Third.name(), "Third");
        assert_eq!(
            TestField::all(),
            &[TestField::First, TestField::Second, TestField::Third]
        );
    }

    #[test]
    fn field_enum_keys_are_ordered_by_declaration() {
        assert!(TestField::First < TestField::Second);
        assert!(TestField::Second < TestField::Third);
    }

    #[test]
    fn field_enum_serializes_as_variant_name() {
        let json = serde_json::to_string(&TestField::Second).unwrap();
        assert_eq!(json, "\"Second\"");

        let back: TestField = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TestField::Second);
    }

    #[test]
    fn field_enum_supports_visibility() {
        field_enum! {
            pub enum PublicField {
                A,
            }
        }

        assert_eq!(PublicField::A.name(), "A");
    }
}
