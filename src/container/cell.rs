//! Shared record cell behind every container shape.

use crate::container::options::ActionOptions;
use crate::core::{OperationFailure, RacePolicy, Sequencer, Ticket, Tracked};
use futures::future::{self, BoxFuture};
use futures::FutureExt;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::{debug, trace, warn};
use uuid::Uuid;

/// Resolution of one invocation of a cell's operation.
pub(crate) type Outcome<R> =
    Result<<R as Tracked>::Value, OperationFailure<<R as Tracked>::Error>>;

/// Owns one record and serializes every write through a watch channel.
///
/// The channel lock is only taken inside `send_modify`/`send_if_modified`,
/// never across an await.
pub(crate) struct StateCell<R> {
    id: Uuid,
    label: String,
    race: RacePolicy,
    tickets: Sequencer,
    tx: watch::Sender<R>,
}

impl<R: Tracked> StateCell<R> {
    pub(crate) fn new(initial: R, options: ActionOptions) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self {
            id: Uuid::new_v4(),
            label: options.label,
            race: options.race,
            tickets: Sequencer::new(),
            tx,
        }
    }

    pub(crate) fn id(&self) -> Uuid {
        self.id
    }

    pub(crate) fn label(&self) -> &str {
        &self.label
    }

    /// Mark the record busy and tag the invocation.
    pub(crate) fn begin(&self) -> Ticket {
        // Issue before flipping busy so a concurrent settle of an older
        // ticket can never clear the flag for this one.
        let ticket = self.tickets.issue();
        self.tx.send_modify(|record| record.begin());
        debug!(
            container = %self.id,
            label = %self.label,
            ticket = ticket.value(),
            "action started"
        );
        ticket
    }

    /// Apply a resolution. Returns false when it was discarded as stale.
    ///
    /// `adjust` sees a successful value just before it is stored, under the
    /// same lock as every other write to the record.
    pub(crate) fn settle(
        &self,
        ticket: Ticket,
        outcome: Outcome<R>,
        adjust: impl FnOnce(&mut R::Value),
    ) -> bool {
        let failed = outcome.is_err();
        let applied = self.tx.send_if_modified(|record| {
            if self.race == RacePolicy::LatestWins && !self.tickets.is_latest(ticket) {
                return false;
            }
            match outcome {
                Ok(mut value) => {
                    adjust(&mut value);
                    record.succeed(value);
                }
                Err(failure) => record.fail(failure),
            }
            true
        });

        if !applied {
            trace!(
                container = %self.id,
                label = %self.label,
                ticket = ticket.value(),
                "discarded stale resolution"
            );
        } else if failed {
            warn!(
                container = %self.id,
                label = %self.label,
                ticket = ticket.value(),
                "action failed"
            );
        } else {
            debug!(
                container = %self.id,
                label = %self.label,
                ticket = ticket.value(),
                "action succeeded"
            );
        }
        applied
    }

    /// Mutate the record outside of an action.
    pub(crate) fn update(&self, modify: impl FnOnce(&mut R)) {
        self.tx.send_modify(modify);
    }

    pub(crate) fn read<V>(&self, view: impl FnOnce(&R) -> V) -> V {
        view(&self.tx.borrow())
    }

    pub(crate) fn is_busy(&self) -> bool {
        self.tx.borrow().is_busy()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<R> {
        self.tx.subscribe()
    }
}

impl<R: Tracked + Clone> StateCell<R> {
    pub(crate) fn snapshot(&self) -> R {
        self.tx.borrow().clone()
    }
}

impl<R> StateCell<R>
where
    R: Tracked + Send + Sync + 'static,
    R::Value: Clone + Send + 'static,
    R::Error: Clone + Send + 'static,
{
    /// Drive `pending` on a runtime task and settle `ticket` with its outcome.
    ///
    /// The task owns the work: dropping the returned future detaches from
    /// the outcome but the record still settles. Without a runtime the
    /// ticket settles at once as [`OperationFailure::Aborted`].
    pub(crate) fn launch(
        self: &Arc<Self>,
        runtime: Option<Handle>,
        ticket: Ticket,
        pending: BoxFuture<'static, Outcome<R>>,
        adjust: impl FnOnce(&mut R::Value) + Send + 'static,
    ) -> BoxFuture<'static, Outcome<R>> {
        let Some(runtime) = runtime else {
            warn!(
                container = %self.id,
                label = %self.label,
                "no tokio runtime to drive the action"
            );
            let outcome: Outcome<R> =
                Err(OperationFailure::Aborted("no tokio runtime".to_string()));
            self.settle(ticket, outcome.clone(), adjust);
            return future::ready(outcome).boxed();
        };

        let cell = Arc::clone(self);
        let task = runtime.spawn(async move {
            let outcome = pending.await;
            cell.settle(ticket, outcome.clone(), adjust);
            outcome
        });

        task.map(|joined| match joined {
            Ok(outcome) => outcome,
            Err(err) => Err(OperationFailure::Aborted(err.to_string())),
        })
        .boxed()
    }
}

/// Start an operation, converting rejections and panics into failures.
///
/// `start` runs immediately; a panic there surfaces as a ready failure
/// instead of unwinding through the caller.
pub(crate) fn guarded<T, E, Fut>(
    start: impl FnOnce() -> Fut,
) -> BoxFuture<'static, Result<T, OperationFailure<E>>>
where
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    match panic::catch_unwind(AssertUnwindSafe(start)) {
        Ok(pending) => AssertUnwindSafe(pending)
            .catch_unwind()
            .map(|polled| match polled {
                Ok(Ok(value)) => Ok(value),
                Ok(Err(err)) => Err(OperationFailure::Rejected(err)),
                Err(payload) => Err(OperationFailure::from_panic(payload)),
            })
            .boxed(),
        Err(payload) => future::ready(Err(OperationFailure::from_panic(payload))).boxed(),
    }
}
