//! Form state observed by renderers.
//!
//! A `FormState` is an immutable value: the reducer never edits one in
//! place, it returns the next state. Renderers only ever read it.

use super::epoch::EpochTracker;
use super::field::{FieldErrors, FormData};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Submission lifecycle: `Idle -> Submitting -> {Success | Error}`.
///
/// # Example
///
/// ```rust
/// use formstate::core::SubmitStatus;
///
/// assert!(SubmitStatus::Idle.accepts_submit());
/// assert!(!SubmitStatus::Submitting.accepts_submit());
/// assert!(SubmitStatus::Error.is_final());
/// assert!(SubmitStatus::Error.is_error());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    Error,
}

impl SubmitStatus {
    /// Status name for display/logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    /// Terminal submission outcomes.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Success | Self::Error)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }

    /// Submission is not re-entrant: only idle and terminal states accept it.
    pub fn accepts_submit(&self) -> bool {
        !matches!(self, Self::Submitting)
    }
}

/// Complete state of one form instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct FormState<T: FormData> {
    pub(crate) data: T,
    pub(crate) errors: FieldErrors<T::Field>,
    pub(crate) sync_errors: FieldErrors<T::Field>,
    pub(crate) async_errors: FieldErrors<T::Field>,
    pub(crate) touched: BTreeSet<T::Field>,
    pub(crate) dirty: BTreeSet<T::Field>,
    pub(crate) validating: BTreeSet<T::Field>,
    pub(crate) status: SubmitStatus,
    pub(crate) submission_error: Option<String>,
    pub(crate) epochs: EpochTracker<T::Field>,
    pub(crate) submit_count: u64,
    pub(crate) submit_pending: bool,
    pub(crate) submitted: Option<T>,
}

impl<T: FormData> FormState<T> {
    /// Fresh state for `initial_data`, tracking epochs for `async_fields`.
    pub fn new(initial_data: T, async_fields: impl IntoIterator<Item = T::Field>) -> Self {
        Self {
            data: initial_data,
            errors: FieldErrors::new(),
            sync_errors: FieldErrors::new(),
            async_errors: FieldErrors::new(),
            touched: BTreeSet::new(),
            dirty: BTreeSet::new(),
            validating: BTreeSet::new(),
            status: SubmitStatus::Idle,
            submission_error: None,
            epochs: EpochTracker::new(async_fields),
            submit_count: 0,
            submit_pending: false,
            submitted: None,
        }
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    /// Visible errors: sync errors first, then async errors, per field.
    pub fn errors(&self) -> &FieldErrors<T::Field> {
        &self.errors
    }

    /// Errors of one field; empty when valid.
    pub fn field_errors(&self, field: T::Field) -> &[String] {
        self.errors.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn touched(&self) -> &BTreeSet<T::Field> {
        &self.touched
    }

    pub fn dirty(&self) -> &BTreeSet<T::Field> {
        &self.dirty
    }

    pub fn validating(&self) -> &BTreeSet<T::Field> {
        &self.validating
    }

    pub fn status(&self) -> SubmitStatus {
        self.status
    }

    pub fn submission_error(&self) -> Option<&str> {
        self.submission_error.as_deref()
    }

    pub fn epochs(&self) -> &EpochTracker<T::Field> {
        &self.epochs
    }

    /// Number of submissions started so far. Survives `Reset`.
    pub fn submit_count(&self) -> u64 {
        self.submit_count
    }

    /// Record handed to the submit handler by the latest submission.
    pub fn submitted_data(&self) -> Option<&T> {
        self.submitted.as_ref()
    }

    /// A submit is waiting for in-flight validations to finish.
    pub fn is_submit_pending(&self) -> bool {
        self.submit_pending
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Nothing is validating, waiting or submitting.
    pub fn is_settled(&self) -> bool {
        self.validating.is_empty() && !self.submit_pending && self.status != SubmitStatus::Submitting
    }

    /// Rebuild the visible error map from sync and async errors.
    pub(crate) fn merge_errors(&mut self) {
        let mut merged = self.sync_errors.clone();
        for (field, messages) in &self.async_errors {
            merged
                .entry(*field)
                .or_default()
                .extend(messages.iter().cloned());
        }
        merged.retain(|_, messages| !messages.is_empty());
        self.errors = merged;
    }
}
