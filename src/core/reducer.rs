//! The form reducer: a pure, total transition function.
//!
//! `reduce(config, state, action)` never mutates `state`; it returns the
//! next state. It performs no I/O. Deciding which asynchronous work follows
//! a transition is the job of the effect planner in [`crate::effects`].

use super::action::{FormAction, SubmitOutcome};
use super::epoch::Epoch;
use super::field::FormData;
use super::state::{FormState, SubmitStatus};
use crate::builder::{FormConfig, ValidationMode};
use crate::schema;

/// Apply one action to a form state.
///
/// Total for every action: invalid or stale inputs leave the state as is.
pub fn reduce<T: FormData>(
    config: &FormConfig<T>,
    state: &FormState<T>,
    action: FormAction<T>,
) -> FormState<T> {
    match action {
        FormAction::SetField { field, value } => set_field(config, state, field, value),
        FormAction::BlurField { field } => blur_field(config, state, field),
        FormAction::Submit => submit(config, state),
        FormAction::ValidationResult {
            field,
            epoch,
            errors,
        } => validation_result(state, field, epoch, errors),
        FormAction::SubmissionResult {
            submission,
            outcome,
        } => submission_result(state, submission, outcome),
        FormAction::Reset => reset(config, state),
    }
}

fn set_field<T: FormData>(
    config: &FormConfig<T>,
    state: &FormState<T>,
    field: T::Field,
    value: T::Value,
) -> FormState<T> {
    let mut next = state.clone();
    next.data.set(field, value);

    if next.data.get(field) == config.initial_data().get(field) {
        next.dirty.remove(&field);
    } else {
        next.dirty.insert(field);
    }
    next.touched.insert(field);
    next.submit_pending = false;

    // Editing after a finished submission makes the form submittable again.
    if next.status.is_final() {
        next.status = SubmitStatus::Idle;
        next.submission_error = None;
    }

    // Async errors describe the previous value.
    next.async_errors.remove(&field);

    if config.has_async_validator(field) {
        if config.mode() == ValidationMode::OnChange {
            start_validation(&mut next, field);
        } else if next.validating.remove(&field) {
            next.epochs.advance(field);
        }
    }

    revalidate(config, &mut next);
    next
}

fn blur_field<T: FormData>(
    config: &FormConfig<T>,
    state: &FormState<T>,
    field: T::Field,
) -> FormState<T> {
    let mut next = state.clone();
    next.touched.insert(field);

    if config.mode() == ValidationMode::OnBlur && config.has_async_validator(field) {
        start_validation(&mut next, field);
    }

    revalidate(config, &mut next);
    next
}

fn submit<T: FormData>(config: &FormConfig<T>, state: &FormState<T>) -> FormState<T> {
    if !state.status.accepts_submit() {
        return state.clone();
    }

    let mut next = state.clone();
    next.status = SubmitStatus::Idle;
    next.submission_error = None;

    // Every async field is checked again below; its old verdict is void.
    let on_submit = config.mode() == ValidationMode::OnSubmit;
    if on_submit {
        for field in config.async_fields() {
            next.async_errors.remove(&field);
        }
    }
    revalidate(config, &mut next);

    if !next.errors.is_empty() {
        reject_submit(&mut next);
        return next;
    }

    if on_submit {
        for field in config.async_fields() {
            start_validation(&mut next, field);
        }
    }

    if next.validating.is_empty() {
        begin_submission(&mut next);
    } else {
        next.submit_pending = true;
    }
    next
}

fn validation_result<T: FormData>(
    state: &FormState<T>,
    field: T::Field,
    epoch: Epoch,
    errors: Vec<String>,
) -> FormState<T> {
    if !state.validating.contains(&field) || !state.epochs.is_current(field, epoch) {
        return state.clone();
    }

    let mut next = state.clone();
    next.validating.remove(&field);
    if errors.is_empty() {
        next.async_errors.remove(&field);
    } else {
        next.async_errors.insert(field, errors);
    }
    next.merge_errors();

    if next.submit_pending && next.validating.is_empty() {
        if next.errors.is_empty() {
            begin_submission(&mut next);
        } else {
            reject_submit(&mut next);
        }
    }
    next
}

fn submission_result<T: FormData>(
    state: &FormState<T>,
    submission: u64,
    outcome: SubmitOutcome,
) -> FormState<T> {
    if state.status != SubmitStatus::Submitting || submission != state.submit_count {
        return state.clone();
    }

    let mut next = state.clone();
    match outcome {
        SubmitOutcome::Success => {
            next.status = SubmitStatus::Success;
            next.submission_error = None;
        }
        SubmitOutcome::Failure(message) => {
            next.status = SubmitStatus::Error;
            next.submission_error = Some(message);
        }
    }
    next
}

fn reset<T: FormData>(config: &FormConfig<T>, state: &FormState<T>) -> FormState<T> {
    let mut next = config.initial_state();
    next.epochs = state.epochs.clone();
    next.epochs.reset();
    next.submit_count = state.submit_count;
    next
}

fn start_validation<T: FormData>(next: &mut FormState<T>, field: T::Field) {
    if next.epochs.advance(field).is_some() {
        next.validating.insert(field);
    }
}

fn begin_submission<T: FormData>(next: &mut FormState<T>) {
    next.submit_pending = false;
    next.status = SubmitStatus::Submitting;
    next.submission_error = None;
    next.submit_count += 1;
    next.submitted = Some(next.data.clone());
}

fn reject_submit<T: FormData>(next: &mut FormState<T>) {
    next.submit_pending = false;
    next.touched.extend(T::fields().iter().copied());
}

fn revalidate<T: FormData>(config: &FormConfig<T>, next: &mut FormState<T>) {
    next.sync_errors = schema::run(config.schema(), &next.data);
    next.merge_errors();
}
