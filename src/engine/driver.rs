//! The engine driver: owns one form's state and executes planned effects.

use crate::builder::FormConfig;
use crate::core::{
    Epoch, Field, FormAction, FormData, FormState, StatusHistory, StatusTransition, SubmitStatus,
};
use crate::effects::{run_submit, run_validator, transition, FormEffect, Transition};
use crate::engine::debounce::DebounceTable;
use crate::engine::error::EngineError;
use chrono::Utc;
use std::future::Future;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::{debug, info, trace, warn};

/// A running form.
///
/// `dispatch` is the only mutation path. Actions are applied one at a time in
/// arrival order; validators and the submit handler run as independent tasks
/// on the Tokio runtime the engine was created in, and feed their results
/// back through `dispatch`. Results that no longer match the current epoch or
/// submission are discarded by the reducer.
///
/// # Example
///
/// ```rust
/// use formstate::{field_enum, FormConfig, FormData, FormEngine, SubmitStatus};
/// use serde::{Deserialize, Serialize};
///
/// field_enum! {
///     pub enum NoteField {
///         Body,
///     }
/// }
///
/// #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
/// struct Note {
///     body: String,
/// }
///
/// impl FormData for Note {
///     type Field = NoteField;
///     type Value = String;
///
///     fn get(&self, _field: NoteField) -> String {
///         self.body.clone()
///     }
///
///     fn set(&mut self, _field: NoteField, value: String) {
///         self.body = value;
///     }
/// }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let config = FormConfig::builder(Note::default())
///     .on_submit(|_note: Note| async { Ok::<(), String>(()) })
///     .build()
///     .unwrap();
/// let engine = FormEngine::new(config).unwrap();
///
/// engine.set_field(NoteField::Body, "hello".to_string());
/// engine.submit();
///
/// let state = engine.settled().await;
/// assert_eq!(state.status(), SubmitStatus::Success);
/// # }
/// ```
pub struct FormEngine<T: FormData> {
    shared: Arc<Shared<T>>,
}

struct Shared<T: FormData> {
    config: FormConfig<T>,
    runtime: Handle,
    cell: Mutex<Cell<T>>,
    state_tx: watch::Sender<FormState<T>>,
}

struct Cell<T: FormData> {
    state: FormState<T>,
    timers: DebounceTable<T::Field>,
    history: StatusHistory,
}

/// Listener calls collected under the lock and made after releasing it.
enum Notification<T> {
    Success(T),
    Failure(String),
}

impl<T: FormData> FormEngine<T> {
    /// Start an engine for `config` on the current Tokio runtime.
    pub fn new(config: FormConfig<T>) -> Result<Self, EngineError> {
        let runtime = Handle::try_current().map_err(|_| EngineError::NoRuntime)?;
        let state = config.initial_state();
        let (state_tx, _) = watch::channel(state.clone());

        Ok(Self {
            shared: Arc::new(Shared {
                config,
                runtime,
                cell: Mutex::new(Cell {
                    state,
                    timers: DebounceTable::new(),
                    history: StatusHistory::new(),
                }),
                state_tx,
            }),
        })
    }

    /// Apply an action and execute the effects it plans.
    pub fn dispatch(&self, action: FormAction<T>) {
        self.shared.dispatch(action);
    }

    pub fn set_field(&self, field: T::Field, value: T::Value) {
        self.dispatch(FormAction::SetField { field, value });
    }

    pub fn blur_field(&self, field: T::Field) {
        self.dispatch(FormAction::BlurField { field });
    }

    pub fn submit(&self) {
        self.dispatch(FormAction::Submit);
    }

    pub fn reset(&self) {
        self.dispatch(FormAction::Reset);
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> FormState<T> {
        self.shared.lock().state.clone()
    }

    /// Receiver that observes every published state.
    pub fn subscribe(&self) -> watch::Receiver<FormState<T>> {
        self.shared.state_tx.subscribe()
    }

    /// Wait until nothing is validating, pending or submitting.
    pub async fn settled(&self) -> FormState<T> {
        let mut receiver = self.subscribe();
        let settled = receiver
            .wait_for(FormState::is_settled)
            .await
            .map(|state| state.clone());
        match settled {
            Ok(state) => state,
            Err(_) => self.state(),
        }
    }

    /// Audit trail of submission status changes.
    pub fn history(&self) -> StatusHistory {
        self.shared.lock().history.clone()
    }

    pub fn config(&self) -> &FormConfig<T> {
        &self.shared.config
    }

    /// Debounced validations waiting for their quiet period.
    pub fn pending_debounce_count(&self) -> usize {
        self.shared.lock().timers.pending_count()
    }
}

impl<T: FormData> Drop for FormEngine<T> {
    fn drop(&mut self) {
        let cancelled = self.shared.lock().timers.cancel_all();
        if cancelled > 0 {
            debug!(cancelled, "form engine dropped with pending debounce timers");
        }
    }
}

impl<T: FormData> Shared<T> {
    fn lock(&self) -> MutexGuard<'_, Cell<T>> {
        self.cell.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn dispatch(self: &Arc<Self>, action: FormAction<T>) {
        let action_name = action.name();
        let field = action.field().map(|field| field.name());
        let completion = matches!(
            action,
            FormAction::ValidationResult { .. } | FormAction::SubmissionResult { .. }
        );
        let is_reset = matches!(action, FormAction::Reset);

        let notifications = {
            let mut cell = self.lock();
            let Transition { state, effects } = transition(&self.config, &cell.state, action);

            if state == cell.state {
                if completion {
                    debug!(action = action_name, field, "discarded stale result");
                } else {
                    trace!(action = action_name, field, "action left state unchanged");
                }
                return;
            }
            trace!(action = action_name, field, effects = effects.len(), "applied action");

            self.record_status_change(&mut cell, &state);
            if is_reset {
                let cancelled = cell.timers.cancel_all();
                debug!(cancelled, "form reset");
            }

            cell.state = state.clone();
            self.state_tx.send_replace(state);

            let mut notifications = Vec::new();
            for effect in effects {
                match effect {
                    FormEffect::InvokeAsyncValidator {
                        field,
                        epoch,
                        value,
                        trigger,
                    } => {
                        let invocation = self.validation_task(field, epoch, value);
                        if trigger.is_debounced() {
                            let delay = self.config.async_debounce();
                            let runtime = self.runtime.clone();
                            let timer = self.runtime.spawn(async move {
                                tokio::time::sleep(delay).await;
                                runtime.spawn(invocation);
                            });
                            if cell.timers.schedule(field, timer) {
                                trace!(field = field.name(), "debounce restarted");
                            }
                        } else {
                            cell.timers.cancel(field);
                            self.runtime.spawn(invocation);
                        }
                    }
                    FormEffect::InvokeSubmit { submission, data } => {
                        self.spawn_submit(submission, data);
                    }
                    FormEffect::InvokeSuccessCallback { data } => {
                        notifications.push(Notification::Success(data));
                    }
                    FormEffect::InvokeErrorCallback { error } => {
                        notifications.push(Notification::Failure(error));
                    }
                }
            }
            notifications
        };

        for notification in notifications {
            self.notify(notification);
        }
    }

    fn record_status_change(&self, cell: &mut Cell<T>, next: &FormState<T>) {
        let from = cell.state.status();
        let to = next.status();
        if from == to {
            return;
        }

        let submission = next.submit_count();
        match to {
            SubmitStatus::Submitting => debug!(submission, "submission started"),
            SubmitStatus::Success => info!(submission, "submission succeeded"),
            SubmitStatus::Error => warn!(
                submission,
                error = next.submission_error().unwrap_or_default(),
                "submission failed"
            ),
            SubmitStatus::Idle => debug!(submission, from = from.name(), "status returned to idle"),
        }

        cell.history.push_bounded(
            StatusTransition {
                from,
                to,
                timestamp: Utc::now(),
                submission,
            },
            self.config.history_limit(),
        );
    }

    /// Future running one validator call and reporting its result.
    fn validation_task(
        self: &Arc<Self>,
        field: T::Field,
        epoch: Epoch,
        value: T::Value,
    ) -> impl Future<Output = ()> + Send + 'static {
        let validator = self.config.async_validator(field);
        let shared: Weak<Self> = Arc::downgrade(self);
        async move {
            let Some(validator) = validator else {
                return;
            };
            trace!(field = field.name(), sequence = epoch.sequence(), "validator started");
            let errors = run_validator(validator, value).await;
            match shared.upgrade() {
                Some(shared) => shared.dispatch(FormAction::ValidationResult {
                    field,
                    epoch,
                    errors,
                }),
                None => trace!(field = field.name(), "engine dropped; validation result discarded"),
            }
        }
    }

    fn spawn_submit(self: &Arc<Self>, submission: u64, data: T) {
        let handler = self.config.submit_handler();
        let shared: Weak<Self> = Arc::downgrade(self);
        self.runtime.spawn(async move {
            let outcome = run_submit(handler, data).await;
            match shared.upgrade() {
                Some(shared) => shared.dispatch(FormAction::SubmissionResult {
                    submission,
                    outcome,
                }),
                None => debug!(submission, "engine dropped; submission outcome discarded"),
            }
        });
    }

    fn notify(&self, notification: Notification<T>) {
        let result = match notification {
            Notification::Success(data) => match self.config.success_listener() {
                Some(listener) => catch_unwind(AssertUnwindSafe(|| listener(&data))),
                None => Ok(()),
            },
            Notification::Failure(error) => match self.config.error_listener() {
                Some(listener) => catch_unwind(AssertUnwindSafe(|| listener(&error))),
                None => Ok(()),
            },
        };
        if result.is_err() {
            warn!("submission listener panicked");
        }
    }
}
