//! Transition log.
//!
//! The log is observational: lookups never consult it, so a machine's next
//! state depends only on its current state and the event.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Transitions kept by a machine's log unless its config says otherwise.
pub const DEFAULT_HISTORY_LIMIT: usize = 256;

/// Record of one applied transition.
///
/// # Example
///
/// ```rust
/// use hookstate::fsm::StateTransition;
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: "idle".to_string(),
///     to: "running".to_string(),
///     event: "START".to_string(),
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.to, "running");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    /// The state being transitioned from
    pub from: String,
    /// The state being transitioned to
    pub to: String,
    /// The event that triggered the move
    pub event: String,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

/// Ordered log of applied transitions.
///
/// A log may carry a limit; once full, [`push`](Self::push) drops the oldest
/// entry. `record` returns a new history with the transition appended and
/// leaves the receiver unchanged.
///
/// # Example
///
/// ```rust
/// use hookstate::fsm::{StateHistory, StateTransition};
/// use chrono::Utc;
///
/// let history = StateHistory::new();
/// let history = history.record(StateTransition {
///     from: "idle".to_string(),
///     to: "running".to_string(),
///     event: "START".to_string(),
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.get_path(), vec!["idle", "running"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateHistory {
    transitions: VecDeque<StateTransition>,
    #[serde(default)]
    limit: Option<usize>,
}

impl StateHistory {
    /// Unbounded log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Log that keeps at most `limit` transitions. A limit of zero keeps none.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            transitions: VecDeque::new(),
            limit: Some(limit),
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Append in place, evicting the oldest entries past the limit.
    pub fn push(&mut self, transition: StateTransition) {
        if self.limit == Some(0) {
            return;
        }
        self.transitions.push_back(transition);
        if let Some(limit) = self.limit {
            while self.transitions.len() > limit {
                self.transitions.pop_front();
            }
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: StateTransition) -> Self {
        let mut next = self.clone();
        next.push(transition);
        next
    }

    /// States traversed: the first `from`, then each `to`.
    pub fn get_path(&self) -> Vec<&str> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.front() {
            path.push(first.from.as_str());
        }
        for transition in &self.transitions {
            path.push(transition.to.as_str());
        }
        path
    }

    /// Events applied, in order.
    pub fn events(&self) -> Vec<&str> {
        self.transitions.iter().map(|t| t.event.as_str()).collect()
    }

    /// Time between the first and last recorded transition.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.front(), self.transitions.back()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    pub fn transitions(&self) -> impl DoubleEndedIterator<Item = &StateTransition> {
        self.transitions.iter()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(from: &str, to: &str, event: &str) -> StateTransition {
        StateTransition {
            from: from.to_string(),
            to: to.to_string(),
            event: event.to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history = StateHistory::new();
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
    }

    #[test]
    fn record_is_immutable() {
        let history = StateHistory::new();
        let new_history = history.record(step("idle", "running", "START"));

        assert_eq!(history.len(), 0);
        assert_eq!(new_history.len(), 1);
    }

    #[test]
    fn push_evicts_oldest_past_limit() {
        let mut history = StateHistory::with_limit(2);
        history.push(step("a", "b", "GO"));
        history.push(step("b", "c", "GO"));
        history.push(step("c", "d", "GO"));

        assert_eq!(history.len(), 2);
        assert_eq!(history.get_path(), vec!["b", "c", "d"]);
    }

    #[test]
    fn zero_limit_keeps_nothing() {
        let mut history = StateHistory::with_limit(0);
        history.push(step("a", "b", "GO"));
        assert!(history.is_empty());
    }

    #[test]
    fn path_and_events_follow_order() {
        let history = StateHistory::new()
            .record(step("idle", "running", "START"))
            .record(step("running", "stopped", "STOP"));

        assert_eq!(history.get_path(), vec!["idle", "running", "stopped"]);
        assert_eq!(history.events(), vec!["START", "STOP"]);
    }

    #[test]
    fn duration_spans_first_to_last() {
        let start = Utc::now();
        let mut first = step("a", "b", "GO");
        first.timestamp = start;
        let mut second = step("b", "c", "GO");
        second.timestamp = start + chrono::Duration::milliseconds(250);

        let history = StateHistory::new().record(first).record(second);

        assert_eq!(history.duration(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn history_serializes_correctly() {
        let history = StateHistory::new().record(step("idle", "running", "START"));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory = serde_json::from_str(&json).unwrap();

        assert_eq!(history, deserialized);
    }
}
