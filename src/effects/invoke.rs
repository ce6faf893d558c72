//! Async validator and submit handler glue.
//!
//! Validators and submit handlers are user code. Their failures, including
//! panics, are converted into plain messages here so the engine never
//! raises.

use crate::core::SubmitOutcome;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

/// Asynchronous per-field validator. `Err(message)` marks the value invalid.
pub type AsyncValidator<V> = Arc<dyn Fn(V) -> BoxFuture<'static, Result<(), String>> + Send + Sync>;

/// Submission handler receiving the full record.
pub type SubmitHandler<T> = Arc<dyn Fn(T) -> BoxFuture<'static, Result<(), String>> + Send + Sync>;

/// Listener notified with the submitted record after a successful submission.
pub type SuccessListener<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Listener notified with the message of a failed submission.
pub type ErrorListener = Arc<dyn Fn(&str) + Send + Sync>;

/// Run a validator, returning its error messages (empty when valid).
pub async fn run_validator<V: Send + 'static>(validator: AsyncValidator<V>, value: V) -> Vec<String> {
    let call = async move { validator(value).await };
    match AssertUnwindSafe(call).catch_unwind().await {
        Ok(Ok(())) => Vec::new(),
        Ok(Err(message)) => vec![message],
        Err(payload) => vec![panic_message(payload.as_ref(), "validator panicked")],
    }
}

/// Run the submit handler and turn its result into a [`SubmitOutcome`].
pub async fn run_submit<T: Send + 'static>(handler: SubmitHandler<T>, data: T) -> SubmitOutcome {
    let call = async move { handler(data).await };
    match AssertUnwindSafe(call).catch_unwind().await {
        Ok(Ok(())) => SubmitOutcome::Success,
        Ok(Err(message)) => SubmitOutcome::Failure(message),
        Err(payload) => {
            SubmitOutcome::Failure(panic_message(payload.as_ref(), "submit handler panicked"))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send), fallback: &str) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        fallback.to_string()
    }
}
