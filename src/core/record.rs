//! Records tracked by async containers.
//!
//! A record is the snapshot a consumer renders from: the last value, the
//! last failure and whether an invocation is outstanding. Containers only
//! touch their record through the [`Tracked`] trait, which keeps the
//! begin/succeed/fail sequencing identical across container shapes.

use super::failure::OperationFailure;
use serde::{Deserialize, Serialize};

/// Sequencing contract shared by every container record.
///
/// `begin` is applied synchronously when an action is invoked. Exactly one of
/// `succeed` or `fail` is applied when that action resolves, and both clear
/// the busy flag.
pub trait Tracked {
    /// Value produced by a successful invocation
    type Value;
    /// Rejection type of the bound operation
    type Error;

    /// Mark an invocation as outstanding.
    fn begin(&mut self);

    /// Store a successful value and clear busy. The last error is kept.
    fn succeed(&mut self, value: Self::Value);

    /// Store a failure and clear busy. The last value is kept.
    fn fail(&mut self, failure: OperationFailure<Self::Error>);

    /// Whether an invocation is outstanding.
    fn is_busy(&self) -> bool;
}

/// Result/error/busy record for controller, fetch and data-source containers.
///
/// # Example
///
/// ```rust
/// use hookstate::core::{OperationFailure, OperationState, Tracked};
///
/// let mut state: OperationState<u32, String> = OperationState::idle();
/// state.begin();
/// assert!(state.busy);
///
/// state.succeed(7);
/// assert_eq!(state.result, Some(7));
/// assert!(!state.busy);
///
/// state.begin();
/// state.fail(OperationFailure::Rejected("offline".to_string()));
/// assert_eq!(state.result, Some(7)); // prior result survives a failure
/// assert!(state.error.is_some());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OperationState<T, E> {
    /// Last successfully produced value
    pub result: Option<T>,
    /// Last captured failure
    pub error: Option<OperationFailure<E>>,
    /// True between invocation start and its resolution
    pub busy: bool,
}

impl<T, E> OperationState<T, E> {
    /// Record for a container that waits for an explicit trigger.
    pub fn idle() -> Self {
        Self {
            result: None,
            error: None,
            busy: false,
        }
    }

    /// Record for a container that starts fetching on construction.
    pub fn pending() -> Self {
        Self {
            busy: true,
            ..Self::idle()
        }
    }
}

impl<T, E> Default for OperationState<T, E> {
    fn default() -> Self {
        Self::idle()
    }
}

impl<T, E> Tracked for OperationState<T, E> {
    type Value = T;
    type Error = E;

    fn begin(&mut self) {
        self.busy = true;
    }

    fn succeed(&mut self, value: T) {
        self.result = Some(value);
        self.busy = false;
    }

    fn fail(&mut self, failure: OperationFailure<E>) {
        self.error = Some(failure);
        self.busy = false;
    }

    fn is_busy(&self) -> bool {
        self.busy
    }
}

/// Whole-state record for the reducer-style container.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ManagedState<S, E> {
    /// Current state; replaced by each successful action
    pub state: S,
    /// Last captured failure
    pub error: Option<OperationFailure<E>>,
    /// True between action start and its resolution
    pub busy: bool,
}

impl<S, E> ManagedState<S, E> {
    /// Idle record holding `state`.
    pub fn new(state: S) -> Self {
        Self {
            state,
            error: None,
            busy: false,
        }
    }
}

impl<S, E> Tracked for ManagedState<S, E> {
    type Value = S;
    type Error = E;

    fn begin(&mut self) {
        self.busy = true;
    }

    fn succeed(&mut self, state: S) {
        self.state = state;
        self.busy = false;
    }

    fn fail(&mut self, failure: OperationFailure<E>) {
        self.error = Some(failure);
        self.busy = false;
    }

    fn is_busy(&self) -> bool {
        self.busy
    }
}
