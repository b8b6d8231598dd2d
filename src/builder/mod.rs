//! Builder API for ergonomic state machine construction.
//!
//! This module provides a fluent builder and the [`transition_table!`]
//! macro for declaring transition tables with minimal boilerplate. Builders
//! validate the table; the macro leaves that to
//! [`Machine::try_new`](crate::fsm::Machine::try_new).
//!
//! [`transition_table!`]: crate::transition_table

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::MachineBuilder;

use crate::fsm::{Machine, MachineConfig, StateNode};

/// Build a permissive machine that walks `states` in order and wraps back
/// to the first one on `event`.
///
/// # Example
///
/// ```
/// use hookstate::builder::cycle;
///
/// let mut light = cycle("NEXT", ["red", "green", "yellow"]);
/// light.transition("NEXT").unwrap();
/// assert_eq!(light.state(), "green");
/// ```
pub fn cycle<I, S>(event: &str, states: I) -> Machine
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let names: Vec<String> = states.into_iter().map(Into::into).collect();
    let initial = names.first().cloned().unwrap_or_default();

    let mut config = MachineConfig::new(initial);
    for (index, name) in names.iter().enumerate() {
        let next = &names[(index + 1) % names.len()];
        config = config.state(name.clone(), StateNode::new().on(event, next.clone()));
    }
    Machine::new(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_wraps_around() {
        let mut machine = cycle("TICK", ["a", "b", "c"]);
        let mut seen = Vec::new();

        for _ in 0..4 {
            machine.transition("TICK").unwrap();
            seen.push(machine.state().to_string());
        }

        assert_eq!(seen, vec!["b", "c", "a", "b"]);
    }

    #[test]
    fn single_state_cycle_loops_on_itself() {
        let mut machine = cycle("TICK", ["only"]);
        assert!(machine.transition("TICK").unwrap().is_moved());
        assert_eq!(machine.state(), "only");
    }

    #[test]
    fn empty_cycle_has_no_transitions() {
        let mut machine = cycle("TICK", Vec::<String>::new());
        assert!(machine.is_terminal());
        assert!(!machine.transition("TICK").unwrap().is_moved());
    }
}
