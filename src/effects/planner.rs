//! Effect planning: which asynchronous work follows a transition.
//!
//! The planner is pure. It runs the reducer and compares the previous and
//! next states: a newly issued epoch for a validating field means "call that
//! field's validator", a new submission number means "call the submit
//! handler", and leaving `Submitting` for a terminal status means "notify the
//! listeners". Deriving effects from the state diff keeps the planner and the
//! reducer from ever disagreeing.

use crate::builder::FormConfig;
use crate::core::{reduce, Epoch, FormAction, FormData, FormState, SubmitStatus};

/// What caused an async validation to be issued.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValidationTrigger {
    /// A value change; debounced by the engine.
    Change,
    /// A blur; runs immediately.
    Blur,
    /// A submit in `OnSubmit` mode; runs immediately.
    Submit,
}

impl ValidationTrigger {
    pub fn is_debounced(&self) -> bool {
        matches!(self, Self::Change)
    }
}

/// Description of asynchronous work to perform. Executed by the engine.
#[derive(Clone, Debug, PartialEq)]
pub enum FormEffect<T: FormData> {
    InvokeAsyncValidator {
        field: T::Field,
        epoch: Epoch,
        value: T::Value,
        trigger: ValidationTrigger,
    },
    InvokeSubmit {
        submission: u64,
        data: T,
    },
    InvokeSuccessCallback {
        data: T,
    },
    InvokeErrorCallback {
        error: String,
    },
}

/// Next state plus the effects it requires.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition<T: FormData> {
    pub state: FormState<T>,
    pub effects: Vec<FormEffect<T>>,
}

/// Reduce `action` and plan its effects in one pass.
pub fn transition<T: FormData>(
    config: &FormConfig<T>,
    previous: &FormState<T>,
    action: FormAction<T>,
) -> Transition<T> {
    let trigger = match &action {
        FormAction::SetField { .. } => ValidationTrigger::Change,
        FormAction::BlurField { .. } => ValidationTrigger::Blur,
        _ => ValidationTrigger::Submit,
    };
    let state = reduce(config, previous, action);
    let effects = diff_effects(previous, &state, trigger);
    Transition { state, effects }
}

/// Effects that `action` would cause from `previous`.
pub fn plan<T: FormData>(
    config: &FormConfig<T>,
    previous: &FormState<T>,
    action: FormAction<T>,
) -> Vec<FormEffect<T>> {
    transition(config, previous, action).effects
}

fn diff_effects<T: FormData>(
    previous: &FormState<T>,
    next: &FormState<T>,
    trigger: ValidationTrigger,
) -> Vec<FormEffect<T>> {
    let mut effects = Vec::new();

    for field in next.validating() {
        let epoch = next.epochs().current(*field);
        if let Some(epoch) = epoch.filter(|_| previous.epochs().current(*field) != epoch) {
            effects.push(FormEffect::InvokeAsyncValidator {
                field: *field,
                epoch,
                value: next.data().get(*field),
                trigger,
            });
        }
    }

    // Edits made while submitting never reach the handler or the listener.
    let submitted = next.submitted_data().unwrap_or(next.data());

    if next.status() == SubmitStatus::Submitting && next.submit_count() != previous.submit_count() {
        effects.push(FormEffect::InvokeSubmit {
            submission: next.submit_count(),
            data: submitted.clone(),
        });
    }

    if previous.status() == SubmitStatus::Submitting {
        match next.status() {
            SubmitStatus::Success => effects.push(FormEffect::InvokeSuccessCallback {
                data: submitted.clone(),
            }),
            SubmitStatus::Error => effects.push(FormEffect::InvokeErrorCallback {
                error: next.submission_error().unwrap_or_default().to_string(),
            }),
            SubmitStatus::Idle | SubmitStatus::Submitting => {}
        }
    }

    effects
}
