//! Submission status history.
//!
//! Every change of [`SubmitStatus`] applied by the engine is recorded with a
//! timestamp, giving an audit trail of submit attempts and their outcomes.

use super::state::SubmitStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single status change.
///
/// # Example
///
/// ```rust
/// use formstate::core::{StatusTransition, SubmitStatus};
/// use chrono::Utc;
///
/// let transition = StatusTransition {
///     from: SubmitStatus::Idle,
///     to: SubmitStatus::Submitting,
///     timestamp: Utc::now(),
///     submission: 1,
/// };
/// assert!(!transition.to.is_final());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatusTransition {
    pub from: SubmitStatus,
    pub to: SubmitStatus,
    pub timestamp: DateTime<Utc>,
    /// Submission number current when the change happened.
    pub submission: u64,
}

/// Ordered history of status changes.
///
/// History is immutable - `record` returns a new history with the
/// transition appended.
///
/// # Example
///
/// ```rust
/// use formstate::core::{StatusHistory, StatusTransition, SubmitStatus};
/// use chrono::Utc;
///
/// let history = StatusHistory::new()
///     .record(StatusTransition {
///         from: SubmitStatus::Idle,
///         to: SubmitStatus::Submitting,
///         timestamp: Utc::now(),
///         submission: 1,
///     })
///     .record(StatusTransition {
///         from: SubmitStatus::Submitting,
///         to: SubmitStatus::Success,
///         timestamp: Utc::now(),
///         submission: 1,
///     });
///
/// assert_eq!(
///     history.get_path(),
///     vec![&SubmitStatus::Idle, &SubmitStatus::Submitting, &SubmitStatus::Success]
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusHistory {
    transitions: Vec<StatusTransition>,
}

impl StatusHistory {
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: StatusTransition) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Append in place, dropping the oldest entries beyond `limit`.
    pub fn push_bounded(&mut self, transition: StatusTransition, limit: usize) {
        self.transitions.push(transition);
        if self.transitions.len() > limit {
            let excess = self.transitions.len() - limit;
            self.transitions.drain(..excess);
        }
    }

    /// Statuses traversed: the first `from`, then every `to`.
    pub fn get_path(&self) -> Vec<&SubmitStatus> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Time between the first and last recorded change.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Number of submissions that reached a terminal outcome.
    pub fn completed_submissions(&self) -> usize {
        self.transitions
            .iter()
            .filter(|t| t.from == SubmitStatus::Submitting && t.to.is_final())
            .count()
    }

    pub fn transitions(&self) -> &[StatusTransition] {
        &self.transitions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transition(from: SubmitStatus, to: SubmitStatus, submission: u64) -> StatusTransition {
        StatusTransition {
            from,
            to,
            timestamp: Utc::now(),
            submission,
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history = StatusHistory::new();
        assert!(history.transitions().is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
    }

    #[test]
    fn record_is_immutable() {
        let history = StatusHistory::new();
        let new_history = history.record(transition(SubmitStatus::Idle, SubmitStatus::Submitting, 1));

        assert_eq!(history.transitions().len(), 0);
        assert_eq!(new_history.transitions().len(), 1);
    }

    #[test]
    fn push_bounded_keeps_only_newest_entries() {
        let mut history = StatusHistory::new();
        for submission in 1..=5 {
            history.push_bounded(
                transition(SubmitStatus::Idle, SubmitStatus::Submitting, submission),
                3,
            );
        }

        let kept: Vec<u64> = history.transitions().iter().map(|t| t.submission).collect();
        assert_eq!(kept, vec![3, 4, 5]);
    }

    #[test]
    fn push_bounded_with_zero_limit_keeps_nothing() {
        let mut history = StatusHistory::new();
        history.push_bounded(transition(SubmitStatus::Idle, SubmitStatus::Submitting, 1), 0);
        assert!(history.transitions().is_empty());
    }

    #[test]
    fn get_path_returns_status_sequence() {
        let history = StatusHistory::new()
            .record(transition(SubmitStatus::Idle, SubmitStatus::Submitting, 1))
            .record(transition(SubmitStatus::Submitting, SubmitStatus::Error, 1))
            .record(transition(SubmitStatus::Error, SubmitStatus::Idle, 1));

        let path = history.get_path();
        assert_eq!(path.len(), 4);
        assert_eq!(path[0], &SubmitStatus::Idle);
        assert_eq!(path[2], &SubmitStatus::Error);
        assert_eq!(path[3], &SubmitStatus::Idle);
    }

    #[test]
    fn completed_submissions_counts_terminal_outcomes() {
        let history = StatusHistory::new()
            .record(transition(SubmitStatus::Idle, SubmitStatus::Submitting, 1))
            .record(transition(SubmitStatus::Submitting, SubmitStatus::Error, 1))
            .record(transition(SubmitStatus::Error, SubmitStatus::Submitting, 2))
            .record(transition(SubmitStatus::Submitting, SubmitStatus::Success, 2))
            .record(transition(SubmitStatus::Success, SubmitStatus::Idle, 2));

        assert_eq!(history.completed_submissions(), 2);
    }

    #[test]
    fn single_transition_has_duration_zero() {
        let history =
            StatusHistory::new().record(transition(SubmitStatus::Idle, SubmitStatus::Submitting, 1));

        assert_eq!(history.duration(), Some(Duration::from_secs(0)));
    }

    #[test]
    fn history_serializes_correctly() {
        let history =
            StatusHistory::new().record(transition(SubmitStatus::Idle, SubmitStatus::Submitting, 1));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StatusHistory = serde_json::from_str(&json).unwrap();

        assert_eq!(history, deserialized);
    }
}
