//! Composition root.
//!
//! [`App`] wires a [`Reconciler`] to a [`CollectionModel`] and a
//! [`ChangeSink`]: record snapshots from load runs are diffed by the model and
//! only real changes reach the sink.

use roster_engine::{ChangeSink, CollectionModel, Error};

use crate::event::LoadEvent;
use crate::notifier::{EventReceiver, SubscriptionId};
use crate::reconciler::Reconciler;

/// Loading state of the most recent run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadStatus {
    /// A run has started and not completed yet
    pub loading: bool,
    /// Failure reported by the last run, cleared when a new run starts
    pub last_error: Option<Error>,
}

/// Model, sink and status, updated from load events.
struct State<S> {
    model: CollectionModel,
    sink: S,
    status: LoadStatus,
}

impl<S: ChangeSink> State<S> {
    fn handle(&mut self, event: LoadEvent) {
        match event {
            LoadEvent::Started => {
                self.status.loading = true;
                self.status.last_error = None;
                self.sink.load_started();
            }
            LoadEvent::Records { origin, records } => {
                match self.model.update(records.iter().cloned()) {
                    Some(changeset) => {
                        tracing::info!(
                            %origin,
                            added = changeset.added.len(),
                            removed = changeset.removed.len(),
                            updated = changeset.updated.len(),
                            "Collection changed"
                        );
                        self.sink.apply(&changeset);
                    }
                    None => tracing::debug!(%origin, "Collection unchanged"),
                }
            }
            LoadEvent::Failed(error) => {
                self.sink.load_failed(&error);
                self.status.last_error = Some(error);
            }
            LoadEvent::Complete => {
                self.status.loading = false;
                self.sink.load_completed();
            }
        }
    }
}

/// A reconciler, the canonical model, and the sink rendering it.
pub struct App<S> {
    reconciler: Reconciler,
    subscription: SubscriptionId,
    events: EventReceiver,
    state: State<S>,
}

impl<S: ChangeSink> App<S> {
    /// Wire a reconciler to a fresh model and the given sink.
    pub fn new(reconciler: Reconciler, sink: S) -> Self {
        let (subscription, events) = reconciler.subscribe();
        Self {
            reconciler,
            subscription,
            events,
            state: State {
                model: CollectionModel::new(),
                sink,
                status: LoadStatus::default(),
            },
        }
    }

    /// Run one load, applying its events as they arrive.
    ///
    /// A cache hit reaches the sink before the remote answers.
    pub async fn load(&mut self) {
        let Self {
            reconciler,
            events,
            state,
            ..
        } = self;

        let mut run = std::pin::pin!(reconciler.load());
        loop {
            tokio::select! {
                Some(event) = events.recv() => state.handle(event),
                () = &mut run => break,
            }
        }

        while let Ok(event) = events.try_recv() {
            state.handle(event);
        }
    }

    /// The canonical model.
    pub fn model(&self) -> &CollectionModel {
        &self.state.model
    }

    /// The sink receiving changesets.
    pub fn sink(&self) -> &S {
        &self.state.sink
    }

    /// Loading state of the most recent run.
    pub fn status(&self) -> &LoadStatus {
        &self.state.status
    }

    /// The underlying reconciler.
    ///
    /// Events from runs started directly on it stay queued on this app's
    /// subscription and reach the model and sink on the next [`App::load`].
    pub fn reconciler(&self) -> &Reconciler {
        &self.reconciler
    }
}

impl<S> Drop for App<S> {
    fn drop(&mut self) {
        self.reconciler.notifier().unsubscribe(self.subscription);
    }
}
