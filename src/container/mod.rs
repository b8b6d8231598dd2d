//! Async action containers.
//!
//! Every container owns one record and sequences it the same way: the record
//! is marked busy when an action is invoked, and exactly one of success or
//! failure is applied when that action resolves. Failures are captured into
//! the record, never raised.
//!
//! # Shapes
//!
//! - [`Controller`]: bound to one operation, invoked repeatedly with input
//! - [`Fetcher`]: each call supplies its own resource function
//! - [`DataSource`]: fetches once on construction, starts busy
//! - [`StateManager`]: reducer-style actions over a whole state value, plus
//!   shallow `set`/`get`
//!
//! # Overlapping invocations
//!
//! Each invocation takes a ticket when it is called. Under the default
//! [`RacePolicy::LatestWins`](crate::core::RacePolicy::LatestWins) only the
//! newest ticket may write the record; older resolutions are still returned
//! to their callers but leave the record alone.

mod cell;
mod controller;
mod data_source;
mod fetch;
mod manager;
mod merge;
mod options;

pub use controller::{BoundOperation, Controller};
pub use data_source::DataSource;
pub use fetch::Fetcher;
pub use manager::StateManager;
pub use merge::Merge;
pub use options::ActionOptions;
