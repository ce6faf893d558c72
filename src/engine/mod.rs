//! Engine driver: the imperative shell around the pure reducer.
//!
//! A [`FormEngine`] owns the state of exactly one form. It serializes
//! dispatched actions, publishes every new state on a `watch` channel, runs
//! the effects the planner emits on the Tokio runtime, debounces
//! change-triggered validations per field, and calls the submission
//! listeners.

mod debounce;
mod driver;
mod error;

pub use driver::FormEngine;
pub use error::EngineError;
