//! State machine error types.

use thiserror::Error;

/// Errors reported by [`Machine::transition`](crate::fsm::Machine::transition).
///
/// Only strict machines report these; permissive machines ignore events
/// with no mapping.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Invalid transition: {state} -> {event}")]
    InvalidTransition { state: String, event: String },
}

/// Inconsistencies in a transition table.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("Initial state '{initial}' is not declared in states")]
    UnknownInitial { initial: String },

    #[error("Transition '{from}' --{event}--> '{to}' targets an undeclared state")]
    UnknownTarget {
        from: String,
        event: String,
        to: String,
    },
}

/// Errors loading a machine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse machine config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Machine config has {} problem(s): {}", .0.len(), join(.0))]
    Invalid(Vec<TableError>),
}

fn join(errors: &[TableError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
