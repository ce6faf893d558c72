//! Core form state types and logic.
//!
//! This module contains the pure core of the form engine:
//! - Typed records via the `FormData` and `Field` traits
//! - `FormState` and the submission status machine
//! - Per-field epochs for stale result detection
//! - The reducer, a total function from `(state, action)` to the next state
//!
//! Nothing in this module performs I/O or spawns work.

mod action;
mod epoch;
mod field;
mod history;
mod reducer;
mod state;

pub use action::{FormAction, SubmitOutcome};
pub use epoch::{Epoch, EpochTracker};
pub use field::{normalize_errors, Field, FieldErrors, FormData};
pub use history::{StatusHistory, StatusTransition};
pub use reducer::reduce;
pub use state::{FormState, SubmitStatus};
