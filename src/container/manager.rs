//! Reducer-style container holding one whole state value.

use crate::container::cell::{guarded, StateCell};
use crate::container::merge::Merge;
use crate::container::options::ActionOptions;
use crate::core::{ManagedState, OperationFailure};
use serde_json::{Map, Value};
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::runtime::Handle;
use tokio::sync::watch;
use uuid::Uuid;

type Replay<S> = Box<dyn Fn(&mut S) + Send + Sync>;

/// Patches applied by `set` while an action was in flight.
///
/// Sequence numbers let an action replay only the patches made after it
/// read its input state. Only touched while the record's lock is held.
struct PatchLog<S> {
    next: u64,
    entries: Vec<(u64, Replay<S>)>,
}

impl<S> PatchLog<S> {
    fn new() -> Self {
        Self {
            next: 0,
            entries: Vec::new(),
        }
    }

    fn mark(&self) -> u64 {
        self.next
    }

    fn push(&mut self, replay: Replay<S>) {
        self.entries.push((self.next, replay));
        self.next += 1;
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn replay_since(&self, mark: u64, state: &mut S) {
        for (_, replay) in self.entries.iter().filter(|(seq, _)| *seq >= mark) {
            replay(state);
        }
    }
}

/// Async container whose actions compute the next state from the current one.
///
/// `action(method, payload)` hands `method` a copy of the current state and
/// the payload; a successful result replaces the whole state. `set` merges a
/// patch into the state directly, without going through an action. Patches
/// set while an action is in flight are merged again on top of its result,
/// so they survive it.
///
/// # Example
///
/// ```rust
/// use hookstate::container::StateManager;
/// use serde_json::{json, Value};
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let counter: StateManager<Value, String> = StateManager::new(json!({ "count": 0 }));
///
/// counter
///     .action(
///         |state: Value, step: i64| async move {
///             let count = state["count"].as_i64().unwrap_or(0);
///             Ok(json!({ "count": count + step }))
///         },
///         5,
///     )
///     .await
///     .unwrap();
///
/// counter.set(json!({ "flag": true }));
/// assert_eq!(counter.get(), json!({ "count": 5, "flag": true }));
/// # });
/// ```
pub struct StateManager<S, E> {
    cell: Arc<StateCell<ManagedState<S, E>>>,
    patches: Arc<Mutex<PatchLog<S>>>,
}

impl<S, E> StateManager<S, E>
where
    S: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    pub fn new(initial: S) -> Self {
        Self::with_options(initial, ActionOptions::new().label("state_manager"))
    }

    pub fn with_options(initial: S, options: ActionOptions) -> Self {
        Self {
            cell: Arc::new(StateCell::new(ManagedState::new(initial), options)),
            patches: Arc::new(Mutex::new(PatchLog::new())),
        }
    }

    /// Run `method(current_state, payload)` and replace the state with its
    /// result.
    ///
    /// The state handed to `method` is read when `action` is called and the
    /// work runs on a runtime task, like
    /// [`Controller::action`](crate::container::Controller::action). A
    /// failure leaves the state untouched and is stored in `error`.
    pub fn action<P, F, Fut>(
        &self,
        method: F,
        payload: P,
    ) -> impl Future<Output = Result<S, OperationFailure<E>>> + Send + 'static
    where
        F: FnOnce(S, P) -> Fut,
        Fut: Future<Output = Result<S, E>> + Send + 'static,
    {
        let ticket = self.cell.begin();
        let mark = lock(&self.patches).mark();
        let current = self.get();
        let pending = guarded(move || method(current, payload));

        let patches = Arc::clone(&self.patches);
        let reapply = move |next: &mut S| lock(&patches).replay_since(mark, next);
        self.cell
            .launch(Handle::try_current().ok(), ticket, pending, reapply)
    }

    /// Current state.
    pub fn get(&self) -> S {
        self.cell.read(|record| record.state.clone())
    }

    /// Shallow-merge `patch` into the current state.
    pub fn set(&self, patch: S::Patch)
    where
        S: Merge,
        S::Patch: Clone + Send + Sync + 'static,
    {
        self.cell.update(|record| {
            let mut patches = lock(&self.patches);
            if record.busy {
                let kept = patch.clone();
                patches.push(Box::new(move |state: &mut S| state.merge(kept.clone())));
            } else {
                patches.clear();
            }
            record.state.merge(patch);
        });
    }

    pub fn snapshot(&self) -> ManagedState<S, E> {
        self.cell.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<ManagedState<S, E>> {
        self.cell.subscribe()
    }

    pub fn is_busy(&self) -> bool {
        self.cell.read(|record| record.busy)
    }

    pub fn error(&self) -> Option<OperationFailure<E>> {
        self.cell.read(|record| record.error.clone())
    }

    pub fn id(&self) -> Uuid {
        self.cell.id()
    }
}

/// Starts from an empty JSON object.
impl<E> Default for StateManager<Value, E>
where
    E: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new(Value::Object(Map::new()))
    }
}

impl<S, E> Clone for StateManager<S, E> {
    fn clone(&self) -> Self {
        Self {
            cell: Arc::clone(&self.cell),
            patches: Arc::clone(&self.patches),
        }
    }
}

fn lock<S>(patches: &Mutex<PatchLog<S>>) -> std::sync::MutexGuard<'_, PatchLog<S>> {
    patches.lock().unwrap_or_else(PoisonError::into_inner)
}
