//! Container bound to a long-lived operation invoked with varying input.

use crate::container::cell::{guarded, StateCell};
use crate::container::options::ActionOptions;
use crate::core::{OperationFailure, OperationState};
use futures::future::BoxFuture;
use futures::FutureExt;
use std::future::Future;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::watch;
use uuid::Uuid;

/// Bound operation stored by a [`Controller`].
pub type BoundOperation<I, T, E> =
    Arc<dyn Fn(I) -> BoxFuture<'static, Result<T, E>> + Send + Sync>;

/// Async container around one operation that is called explicitly and
/// repeatedly.
///
/// Cloning a controller yields another handle to the same record.
///
/// # Example
///
/// ```rust
/// use hookstate::container::Controller;
///
/// # tokio_test_block(async {
/// let lookup = Controller::new(|id: u32| async move {
///     if id == 0 {
///         Err("no such user".to_string())
///     } else {
///         Ok(format!("user-{id}"))
///     }
/// });
///
/// assert!(!lookup.is_busy());
///
/// let name = lookup.action(7).await;
/// assert_eq!(name, Ok("user-7".to_string()));
/// assert_eq!(lookup.snapshot().result, Some("user-7".to_string()));
///
/// let _ = lookup.action(0).await;
/// let snapshot = lookup.snapshot();
/// assert_eq!(snapshot.result, Some("user-7".to_string()));
/// assert!(snapshot.error.is_some());
/// # });
/// # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
/// # }
/// ```
pub struct Controller<I, T, E> {
    cell: Arc<StateCell<OperationState<T, E>>>,
    operation: BoundOperation<I, T, E>,
}

impl<I, T, E> Controller<I, T, E>
where
    I: Send + 'static,
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Create a controller with default options.
    pub fn new<F, Fut>(operation: F) -> Self
    where
        F: Fn(I) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        Self::with_options(operation, ActionOptions::default())
    }

    pub fn with_options<F, Fut>(operation: F, options: ActionOptions) -> Self
    where
        F: Fn(I) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        let operation: BoundOperation<I, T, E> = Arc::new(move |input| operation(input).boxed());
        Self {
            cell: Arc::new(StateCell::new(OperationState::idle(), options)),
            operation,
        }
    }

    /// Invoke the bound operation with `input`.
    ///
    /// The record is marked busy before this returns and the operation is
    /// spawned onto the current tokio runtime, so it runs and settles the
    /// record whether or not the returned future is awaited. Awaiting it
    /// yields the operation's outcome. Called outside a runtime, the action
    /// settles at once as [`OperationFailure::Aborted`].
    pub fn action(
        &self,
        input: I,
    ) -> impl Future<Output = Result<T, OperationFailure<E>>> + Send + 'static {
        let ticket = self.cell.begin();
        let operation = Arc::clone(&self.operation);
        let pending = guarded(move || operation(input));
        self.cell
            .launch(Handle::try_current().ok(), ticket, pending, |_| {})
    }

    pub fn snapshot(&self) -> OperationState<T, E> {
        self.cell.snapshot()
    }

    /// Receiver notified after every record change.
    pub fn subscribe(&self) -> watch::Receiver<OperationState<T, E>> {
        self.cell.subscribe()
    }

    pub fn is_busy(&self) -> bool {
        self.cell.is_busy()
    }

    pub fn id(&self) -> Uuid {
        self.cell.id()
    }

    pub fn label(&self) -> &str {
        self.cell.label()
    }
}

impl<I, T, E> Clone for Controller<I, T, E> {
    fn clone(&self) -> Self {
        Self {
            cell: Arc::clone(&self.cell),
            operation: Arc::clone(&self.operation),
        }
    }
}
