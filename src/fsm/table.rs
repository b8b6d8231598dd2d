//! Static transition tables.

use crate::fsm::error::{ConfigError, TableError};
use crate::fsm::history::DEFAULT_HISTORY_LIMIT;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Outgoing transitions of one state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateNode {
    /// Event name to next state name
    #[serde(default)]
    pub on: BTreeMap<String, String>,
}

impl StateNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an outgoing transition.
    pub fn on(mut self, event: impl Into<String>, to: impl Into<String>) -> Self {
        self.on.insert(event.into(), to.into());
        self
    }
}

/// How a machine treats events with no mapping from the current state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionMode {
    /// Unmapped events are silently ignored
    #[default]
    Permissive,

    /// Unmapped events are reported as `TransitionError::InvalidTransition`
    Strict,
}

/// Transition table plus the initial state.
///
/// The serialized form matches the declarative config consumers already
/// write:
///
/// ```rust
/// use hookstate::fsm::MachineConfig;
///
/// let config = MachineConfig::from_json(r#"{
///     "initial": "idle",
///     "states": {
///         "idle": { "on": { "START": "running" } },
///         "running": { "on": { "STOP": "stopped" } },
///         "stopped": { "on": { "RESET": "idle" } }
///     }
/// }"#).unwrap();
///
/// assert_eq!(config.next("idle", "START"), Some("running"));
/// assert_eq!(config.next("idle", "STOP"), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineConfig {
    pub initial: String,

    #[serde(default)]
    pub states: BTreeMap<String, StateNode>,

    #[serde(default)]
    pub mode: TransitionMode,

    /// Transitions a machine keeps in its log; zero disables logging
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

impl MachineConfig {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            initial: initial.into(),
            states: BTreeMap::new(),
            mode: TransitionMode::default(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Add or replace a state's node.
    pub fn state(mut self, name: impl Into<String>, node: StateNode) -> Self {
        self.states.insert(name.into(), node);
        self
    }

    pub fn mode(mut self, mode: TransitionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Parse a config from JSON without validating it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Pure lookup of `states[state].on[event]`.
    pub fn next(&self, state: &str, event: &str) -> Option<&str> {
        self.states
            .get(state)
            .and_then(|node| node.on.get(event))
            .map(String::as_str)
    }

    pub fn contains(&self, state: &str) -> bool {
        self.states.contains_key(state)
    }

    /// Events with a mapping from `state`, in sorted order.
    pub fn events_from(&self, state: &str) -> Vec<&str> {
        self.states
            .get(state)
            .map(|node| node.on.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Check the table, accumulating every problem.
    ///
    /// A valid table declares its initial state and only targets declared
    /// states, so a machine built from it can never leave the key set.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<TableError>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<TableError>>> = Vec::new();

        checks.push(if self.contains(&self.initial) {
            Validation::success(())
        } else {
            Validation::fail(TableError::UnknownInitial {
                initial: self.initial.clone(),
            })
        });

        for (from, node) in &self.states {
            for (event, to) in &node.on {
                checks.push(if self.contains(to) {
                    Validation::success(())
                } else {
                    Validation::fail(TableError::UnknownTarget {
                        from: from.clone(),
                        event: event.clone(),
                        to: to.clone(),
                    })
                });
            }
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// [`validate`](Self::validate) as a `Result`.
    pub fn check(&self) -> Result<(), Vec<TableError>> {
        match self.validate() {
            Validation::Success(_) => Ok(()),
            Validation::Failure(errors) => Err(errors.iter().cloned().collect()),
        }
    }
}
