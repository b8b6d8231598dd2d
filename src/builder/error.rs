//! Build errors for the state machine builder.

use crate::fsm::TableError;
use thiserror::Error;

/// Errors that can occur when building a state machine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("No states defined. Add at least one state or transition")]
    NoStates,

    #[error("Transition table is inconsistent: {0:?}")]
    InvalidTable(Vec<TableError>),
}
