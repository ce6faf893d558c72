//! Actions accepted by the form reducer.

use super::epoch::Epoch;
use super::field::FormData;
use serde::{Deserialize, Serialize};

/// Outcome of a submit handler call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmitOutcome {
    Success,
    Failure(String),
}

/// A discrete input to the form state machine.
///
/// Renderers dispatch `SetField`, `BlurField`, `Submit` and `Reset`. The
/// engine feeds `ValidationResult` and `SubmissionResult` back in when the
/// corresponding asynchronous work completes.
#[derive(Clone, Debug, PartialEq)]
pub enum FormAction<T: FormData> {
    SetField {
        field: T::Field,
        value: T::Value,
    },
    BlurField {
        field: T::Field,
    },
    Submit,
    ValidationResult {
        field: T::Field,
        epoch: Epoch,
        errors: Vec<String>,
    },
    SubmissionResult {
        /// Number of the submission this outcome belongs to.
        submission: u64,
        outcome: SubmitOutcome,
    },
    Reset,
}

impl<T: FormData> FormAction<T> {
    /// Action name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetField { .. } => "SetField",
            Self::BlurField { .. } => "BlurField",
            Self::Submit => "Submit",
            Self::ValidationResult { .. } => "ValidationResult",
            Self::SubmissionResult { .. } => "SubmissionResult",
            Self::Reset => "Reset",
        }
    }

    /// Field targeted by the action, if any.
    pub fn field(&self) -> Option<T::Field> {
        match self {
            Self::SetField { field, .. }
            | Self::BlurField { field }
            | Self::ValidationResult { field, .. } => Some(*field),
            Self::Submit | Self::SubmissionResult { .. } | Self::Reset => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ContactField, ContactForm};

    #[test]
    fn action_names_are_stable() {
        let set: FormAction<ContactForm> = FormAction::SetField {
            field: ContactField::Name,
            value: "Ada".to_string(),
        };
        assert_eq!(set.name(), "SetField");
        assert_eq!(FormAction::<ContactForm>::Submit.name(), "Submit");
        assert_eq!(FormAction::<ContactForm>::Reset.name(), "Reset");
    }

    #[test]
    fn field_is_reported_for_field_actions() {
        let blur: FormAction<ContactForm> = FormAction::BlurField {
            field: ContactField::Email,
        };
        let result: FormAction<ContactForm> = FormAction::SubmissionResult {
            submission: 1,
            outcome: SubmitOutcome::Success,
        };

        assert_eq!(blur.field(), Some(ContactField::Email));
        assert_eq!(result.field(), None);
    }
}
