//! Per-field debounce timers.

use std::collections::HashMap;
use std::hash::Hash;
use tokio::task::JoinHandle;

/// Pending debounce timers keyed by field.
///
/// A timer task only sleeps and then hands the validator call off to a
/// separate task, so aborting a timer never cancels a validator that has
/// already started.
#[derive(Debug)]
pub(crate) struct DebounceTable<F> {
    timers: HashMap<F, JoinHandle<()>>,
}

impl<F: Copy + Eq + Hash> DebounceTable<F> {
    pub(crate) fn new() -> Self {
        Self {
            timers: HashMap::new(),
        }
    }

    /// Install `timer` for `field`, aborting the one it replaces.
    /// Returns true if a pending timer was replaced.
    pub(crate) fn schedule(&mut self, field: F, timer: JoinHandle<()>) -> bool {
        match self.timers.insert(field, timer) {
            Some(previous) => {
                let pending = !previous.is_finished();
                previous.abort();
                pending
            }
            None => false,
        }
    }

    /// Abort the pending timer of `field`, if any.
    pub(crate) fn cancel(&mut self, field: F) -> bool {
        match self.timers.remove(&field) {
            Some(timer) => {
                let pending = !timer.is_finished();
                timer.abort();
                pending
            }
            None => false,
        }
    }

    /// Abort every timer. Returns how many were still pending.
    pub(crate) fn cancel_all(&mut self) -> usize {
        self.timers
            .drain()
            .map(|(_, timer)| {
                let pending = !timer.is_finished();
                timer.abort();
                pending
            })
            .filter(|pending| *pending)
            .count()
    }

    /// Timers that have not fired yet.
    pub(crate) fn pending_count(&self) -> usize {
        self.timers
            .values()
            .filter(|timer| !timer.is_finished())
            .count()
    }
}
