//! Hookstate: async state containers and a declarative state machine
//!
//! Hookstate is the state core behind UI data hooks. Presentation code calls
//! an entry point, the core updates a small record, and the presentation
//! layer re-renders from a snapshot of that record.
//!
//! # Core Concepts
//!
//! - **Containers**: result/error/busy records sequenced around an async
//!   operation (`Controller`, `Fetcher`, `DataSource`, `StateManager`)
//! - **Failures**: captured into the record, never raised
//! - **Machines**: table-driven state machines whose transitions are pure
//!   lookups
//!
//! # Example
//!
//! ```rust
//! use hookstate::container::Controller;
//! use hookstate::transition_table;
//! use hookstate::fsm::Machine;
//!
//! let mut machine = Machine::new(transition_table! {
//!     initial: idle,
//!     idle => { START => running },
//!     running => { STOP => stopped },
//!     stopped => { RESET => idle },
//! });
//! machine.transition("START").unwrap();
//! assert_eq!(machine.state(), "running");
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let double = Controller::new(|n: u32| async move { Ok::<_, String>(n * 2) });
//! double.action(21).await.unwrap();
//! assert_eq!(double.snapshot().result, Some(42));
//! # });
//! ```

pub mod builder;
pub mod container;
pub mod core;
pub mod fsm;

// Re-export commonly used types
pub use crate::container::{ActionOptions, Controller, DataSource, Fetcher, StateManager};
pub use crate::core::{OperationFailure, OperationState, RacePolicy};
pub use crate::fsm::{Machine, MachineConfig, TransitionError, TransitionMode};
