//! Table-driven state machine.

use crate::fsm::error::{ConfigError, TransitionError};
use crate::fsm::history::{StateHistory, StateTransition};
use crate::fsm::table::{MachineConfig, TransitionMode};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, warn};

/// Outcome of a transition call that did not fail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// The table had a mapping and the machine moved
    Moved { from: String, to: String },

    /// Permissive machine, no mapping: nothing changed
    Ignored,
}

impl Step {
    pub fn is_moved(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

/// Finite-state machine over a static [`MachineConfig`].
///
/// The next state is a pure lookup of `states[current].on[event]`. There are
/// no guards, no entry/exit actions and no history states; the recorded
/// [`StateHistory`] is only a log.
///
/// # Example
///
/// ```rust
/// use hookstate::fsm::{Machine, MachineConfig, StateNode};
///
/// let config = MachineConfig::new("idle")
///     .state("idle", StateNode::new().on("START", "running"))
///     .state("running", StateNode::new().on("STOP", "stopped"))
///     .state("stopped", StateNode::new().on("RESET", "idle"));
///
/// let mut machine = Machine::new(config);
/// machine.transition("STOP").unwrap(); // no mapping from idle: ignored
/// assert_eq!(machine.state(), "idle");
///
/// machine.transition("START").unwrap();
/// assert_eq!(machine.state(), "running");
/// ```
#[derive(Clone, Debug)]
pub struct Machine {
    config: Arc<MachineConfig>,
    current: String,
    history: StateHistory,
}

impl Machine {
    /// Create a machine in the config's initial state.
    ///
    /// The table is not required to be consistent. States missing from it
    /// simply have no outgoing transitions.
    pub fn new(config: MachineConfig) -> Self {
        if let Err(problems) = config.check() {
            warn!(
                initial = %config.initial,
                problems = problems.len(),
                "transition table is inconsistent"
            );
        }
        Self {
            current: config.initial.clone(),
            history: StateHistory::with_limit(config.history_limit),
            config: Arc::new(config),
        }
    }

    /// Create a machine only if the table is consistent.
    pub fn try_new(config: MachineConfig) -> Result<Self, ConfigError> {
        config.check().map_err(ConfigError::Invalid)?;
        Ok(Self::new(config))
    }

    /// Parse, validate and construct.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Self::try_new(MachineConfig::from_json(json)?)
    }

    /// Apply `event` to the current state.
    ///
    /// With no mapping, a permissive machine returns `Ok(Step::Ignored)` and
    /// a strict one returns `TransitionError::InvalidTransition`. Either way
    /// the current state is unchanged.
    pub fn transition(&mut self, event: &str) -> Result<Step, TransitionError> {
        let Some(next) = self
            .config
            .next(&self.current, event)
            .map(str::to_string)
        else {
            debug!(state = %self.current, event = %event, "no transition for event");
            return match self.config.mode {
                TransitionMode::Permissive => Ok(Step::Ignored),
                TransitionMode::Strict => Err(TransitionError::InvalidTransition {
                    state: self.current.clone(),
                    event: event.to_string(),
                }),
            };
        };

        let from = std::mem::replace(&mut self.current, next.clone());
        self.history.push(StateTransition {
            from: from.clone(),
            to: next.clone(),
            event: event.to_string(),
            timestamp: Utc::now(),
        });
        debug!(from = %from, to = %next, event = %event, "transition applied");

        Ok(Step::Moved { from, to: next })
    }

    /// Current state name.
    pub fn state(&self) -> &str {
        &self.current
    }

    pub fn matches(&self, state: &str) -> bool {
        self.current == state
    }

    /// Whether `event` has a mapping from the current state.
    pub fn can(&self, event: &str) -> bool {
        self.config.next(&self.current, event).is_some()
    }

    pub fn available_events(&self) -> Vec<&str> {
        self.config.events_from(&self.current)
    }

    /// No outgoing transitions from the current state.
    pub fn is_terminal(&self) -> bool {
        self.available_events().is_empty()
    }

    pub fn mode(&self) -> TransitionMode {
        self.config.mode
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// The most recent transitions, up to the config's `history_limit`.
    pub fn history(&self) -> &StateHistory {
        &self.history
    }
}
