//! Effects: the imperative edge of the form engine.
//!
//! # Key Concepts
//!
//! - **Effect descriptors**: `FormEffect` values describe async work without
//!   performing it
//! - **Planner**: a pure function from `(previous state, action)` to the
//!   effects that action requires
//! - **Invocation**: wrappers that run user validators and submit handlers
//!   and turn every failure (including panics) into a message
//!
//! The engine driver executes effects and feeds their completions back as
//! actions.

mod invoke;
mod planner;

pub use invoke::{
    run_submit, run_validator, AsyncValidator, ErrorListener, SubmitHandler, SuccessListener,
};
pub use planner::{plan, transition, FormEffect, Transition, ValidationTrigger};
