//! Per-field epochs for discarding stale asynchronous validation results.
//!
//! Every time an async validation is issued for a field, the field's epoch
//! advances and the request is tagged with the new value. A result is only
//! applied if its tag is still the field's current epoch when it arrives, so
//! at most the most recently issued request for a field ever lands.

use super::field::Field;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tag attached to an issued async validation.
///
/// `sequence` is the per-field counter (0 before any validation).
/// `generation` separates counters from before and after a reset, so that
/// sequence numbers reused after a reset never match an old request.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Epoch {
    generation: u64,
    sequence: u64,
}

impl Epoch {
    pub fn new(generation: u64, sequence: u64) -> Self {
        Self {
            generation,
            sequence,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

/// Epoch counters for every field that has an async validator.
///
/// # Example
///
/// ```rust
/// use formstate::core::EpochTracker;
/// use formstate::field_enum;
///
/// field_enum! {
///     enum F {
///         Email,
///     }
/// }
///
/// let mut epochs = EpochTracker::new([F::Email]);
/// let first = epochs.advance(F::Email).unwrap();
/// let second = epochs.advance(F::Email).unwrap();
///
/// assert!(second > first);
/// assert!(!epochs.is_current(F::Email, first));
/// assert!(epochs.is_current(F::Email, second));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct EpochTracker<F: Field> {
    generation: u64,
    counters: BTreeMap<F, u64>,
}

impl<F: Field> EpochTracker<F> {
    /// Track the given fields, all starting at sequence 0.
    pub fn new(fields: impl IntoIterator<Item = F>) -> Self {
        Self {
            generation: 0,
            counters: fields.into_iter().map(|field| (field, 0)).collect(),
        }
    }

    pub fn tracks(&self, field: F) -> bool {
        self.counters.contains_key(&field)
    }

    /// Current epoch of a tracked field.
    pub fn current(&self, field: F) -> Option<Epoch> {
        self.counters
            .get(&field)
            .map(|sequence| Epoch::new(self.generation, *sequence))
    }

    /// Advance a tracked field and return its new epoch.
    ///
    /// Returns `None` for fields without an async validator.
    pub fn advance(&mut self, field: F) -> Option<Epoch> {
        let counter = self.counters.get_mut(&field)?;
        *counter += 1;
        Some(Epoch::new(self.generation, *counter))
    }

    /// Check whether a result tagged `epoch` may still be applied.
    pub fn is_current(&self, field: F, epoch: Epoch) -> bool {
        self.current(field) == Some(epoch)
    }

    /// Return every counter to 0.
    ///
    /// The generation only moves when some validation was issued since the
    /// last reset, which keeps resetting idempotent.
    pub fn reset(&mut self) {
        if self.counters.values().any(|sequence| *sequence > 0) {
            self.generation += 1;
        }
        for sequence in self.counters.values_mut() {
            *sequence = 0;
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = F> + '_ {
        self.counters.keys().copied()
    }
}
