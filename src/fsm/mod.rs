//! Declarative finite-state machine.
//!
//! A machine is a current state name plus a static table mapping each state
//! to its `{event: next_state}` map. `transition(event)` is a pure lookup;
//! an event with no mapping leaves the state unchanged and is either ignored
//! (the default) or reported, depending on the table's [`TransitionMode`].

mod error;
mod history;
mod machine;
mod table;

pub use error::{ConfigError, TableError, TransitionError};
pub use history::{StateHistory, StateTransition, DEFAULT_HISTORY_LIMIT};
pub use machine::{Machine, Step};
pub use table::{MachineConfig, StateNode, TransitionMode};
