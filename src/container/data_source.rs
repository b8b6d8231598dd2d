//! Container that fetches once, eagerly, at construction.

use crate::container::cell::{guarded, StateCell};
use crate::container::options::ActionOptions;
use crate::core::{OperationState, Tracked};
use std::future::Future;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::watch;
use uuid::Uuid;

/// Async container bound to a single resource fetched on construction.
///
/// The record starts busy. The resource is spawned onto a tokio runtime and
/// settles the record when it resolves; there is no manual trigger and no
/// refetch.
pub struct DataSource<T, E> {
    cell: Arc<StateCell<OperationState<T, E>>>,
}

impl<T, E> DataSource<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Start fetching `resource` immediately on the current tokio runtime.
    ///
    /// Outside a runtime the record settles at once with
    /// [`OperationFailure::Aborted`](crate::core::OperationFailure::Aborted);
    /// use [`spawn_on`](Self::spawn_on) to name a runtime explicitly.
    pub fn spawn<F, Fut>(resource: F) -> Self
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        Self::spawn_with_options(resource, ActionOptions::new().label("data_source"))
    }

    pub fn spawn_with_options<F, Fut>(resource: F, options: ActionOptions) -> Self
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        Self::start(Handle::try_current().ok(), resource, options)
    }

    /// Start fetching `resource` on the runtime behind `handle`.
    pub fn spawn_on<F, Fut>(handle: &Handle, resource: F, options: ActionOptions) -> Self
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        Self::start(Some(handle.clone()), resource, options)
    }

    fn start<F, Fut>(runtime: Option<Handle>, resource: F, options: ActionOptions) -> Self
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        let cell = Arc::new(StateCell::new(OperationState::pending(), options));
        let ticket = cell.begin();
        let pending = guarded(resource);

        // The record settles from the task; nobody awaits the outcome here.
        drop(cell.launch(runtime, ticket, pending, |_| {}));

        Self { cell }
    }

    /// Wait until the fetch has resolved and return the settled record.
    pub async fn settled(&self) -> OperationState<T, E> {
        let mut rx = self.cell.subscribe();
        let settled = match rx.wait_for(|record| !record.is_busy()).await {
            Ok(record) => Some(record.clone()),
            Err(_) => None,
        };
        settled.unwrap_or_else(|| self.cell.snapshot())
    }

    pub fn snapshot(&self) -> OperationState<T, E> {
        self.cell.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<OperationState<T, E>> {
        self.cell.subscribe()
    }

    pub fn is_busy(&self) -> bool {
        self.cell.is_busy()
    }

    pub fn id(&self) -> Uuid {
        self.cell.id()
    }
}

impl<T, E> Clone for DataSource<T, E> {
    fn clone(&self) -> Self {
        Self {
            cell: Arc::clone(&self.cell),
        }
    }
}
