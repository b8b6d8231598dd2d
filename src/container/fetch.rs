//! Container whose resource function is supplied per call.

use crate::container::cell::{guarded, StateCell};
use crate::container::options::ActionOptions;
use crate::core::{OperationFailure, OperationState};
use std::future::Future;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::watch;
use uuid::Uuid;

/// Async container with no bound operation.
///
/// Each [`fetch`](Fetcher::fetch) call brings its own nullary resource
/// function; the record and its sequencing are the same as a
/// [`Controller`](crate::container::Controller)'s.
pub struct Fetcher<T, E> {
    cell: Arc<StateCell<OperationState<T, E>>>,
}

impl<T, E> Fetcher<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::with_options(ActionOptions::new().label("fetch"))
    }

    pub fn with_options(options: ActionOptions) -> Self {
        Self {
            cell: Arc::new(StateCell::new(OperationState::idle(), options)),
        }
    }

    /// Start `resource` and track it in the record.
    ///
    /// Like [`Controller::action`](crate::container::Controller::action),
    /// the work runs on a runtime task and settles the record even if the
    /// returned future is dropped.
    pub fn fetch<F, Fut>(
        &self,
        resource: F,
    ) -> impl Future<Output = Result<T, OperationFailure<E>>> + Send + 'static
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        let ticket = self.cell.begin();
        let pending = guarded(resource);
        self.cell
            .launch(Handle::try_current().ok(), ticket, pending, |_| {})
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

impl<T, E> Default for Fetcher<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> Clone for Fetcher<T, E> {
    fn clone(&self) -> Self {
        Self {
            cell: Arc::clone(&self.cell),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn new_fetcher_is_idle() {
        let fetcher: Fetcher<String, String> = Fetcher::new();
        assert_eq!(fetcher.snapshot(), OperationState::idle());
    }

    #[tokio::test]
    async fn each_call_brings_its_own_resource() {
        let fetcher: Fetcher<Vec<&str>, String> = Fetcher::new();

        fetcher.fetch(|| async { Ok(vec!["a"]) }).await.unwrap();
        assert_eq!(fetcher.snapshot().result, Some(vec!["a"]));

        fetcher.fetch(|| async { Ok(vec!["b", "c"]) }).await.unwrap();
        assert_eq!(fetcher.snapshot().result, Some(vec!["b", "c"]));
    }

    #[tokio::test]
    async fn fetch_abandoned_by_select_still_settles() {
        let fetcher: Fetcher<&str, ()> = Fetcher::new();

        tokio::select! {
            _ = fetcher.fetch(|| async {
                tokio::time::sleep(Duration::from_millis(30)).await;
                Ok("late")
            }) => panic!("slow fetch won the race"),
            _ = tokio::time::sleep(Duration::from_millis(1)) => {}
        }
        assert!(fetcher.is_busy());

        let mut updates = fetcher.subscribe();
        updates.wait_for(|state| !state.busy).await.unwrap();
        assert_eq!(fetcher.snapshot().result, Some("late"));
    }

    #[tokio::test]
    async fn rejected_fetch_clears_busy() {
        let fetcher: Fetcher<u32, String> = Fetcher::new();
        fetcher.fetch(|| async { Ok(1) }).await.unwrap();

        let pending = fetcher.fetch(|| async { Err("404".to_string()) });
        assert!(fetcher.is_busy());
        let outcome = pending.await;

        assert_eq!(outcome, Err(OperationFailure::Rejected("404".to_string())));
        let snapshot = fetcher.snapshot();
        assert!(!snapshot.busy);
        assert_eq!(snapshot.result, Some(1));
        assert_eq!(snapshot.error, Some(OperationFailure::Rejected("404".to_string())));
    }
}
