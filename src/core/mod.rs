//! Core record types shared by every async container.
//!
//! This module contains the plain data the containers sequence:
//! - Records (`OperationState`, `ManagedState`) and the `Tracked` contract
//! - Captured failures (`OperationFailure`)
//! - Invocation tickets for discarding stale resolutions
//!
//! Nothing here performs I/O or touches a runtime.

mod failure;
mod record;
mod sequence;

pub use failure::OperationFailure;
pub use record::{ManagedState, OperationState, Tracked};
pub use sequence::{RacePolicy, Sequencer, Ticket};
