//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::fsm::{Machine, MachineConfig, StateNode, TransitionMode, DEFAULT_HISTORY_LIMIT};
use std::collections::BTreeMap;

/// Builder for constructing validated state machines with a fluent API.
///
/// # Example
///
/// ```rust
/// use hookstate::builder::MachineBuilder;
///
/// let mut machine = MachineBuilder::new()
///     .initial("idle")
///     .on("idle", "START", "running")
///     .on("running", "STOP", "stopped")
///     .state("stopped")
///     .build()
///     .unwrap();
///
/// machine.transition("START").unwrap();
/// assert_eq!(machine.state(), "running");
/// ```
#[derive(Debug)]
pub struct MachineBuilder {
    initial: Option<String>,
    states: BTreeMap<String, StateNode>,
    mode: TransitionMode,
    history_limit: usize,
}

impl Default for MachineBuilder {
    fn default() -> Self {
        Self {
            initial: None,
            states: BTreeMap::new(),
            mode: TransitionMode::default(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl MachineBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: impl Into<String>) -> Self {
        self.initial = Some(state.into());
        self
    }

    /// Declare a state. Declaring a state twice keeps its transitions.
    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.states.entry(state.into()).or_default();
        self
    }

    /// Add a transition, declaring `from` if needed.
    ///
    /// `to` is not declared implicitly; terminal states need `.state(..)`.
    pub fn on(
        mut self,
        from: impl Into<String>,
        event: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        self.states
            .entry(from.into())
            .or_default()
            .on
            .insert(event.into(), to.into());
        self
    }

    pub fn mode(mut self, mode: TransitionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Cap the transition log.
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Report unmapped events as errors.
    pub fn strict(self) -> Self {
        self.mode(TransitionMode::Strict)
    }

    /// Build and validate the config without constructing a machine.
    pub fn build_config(self) -> Result<MachineConfig, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        if self.states.is_empty() {
            return Err(BuildError::NoStates);
        }

        let config = MachineConfig {
            initial,
            states: self.states,
            mode: self.mode,
            history_limit: self.history_limit,
        };
        config.check().map_err(BuildError::InvalidTable)?;
        Ok(config)
    }

    /// Build the state machine.
    pub fn build(self) -> Result<Machine, BuildError> {
        self.build_config().map(Machine::new)
    }
}
