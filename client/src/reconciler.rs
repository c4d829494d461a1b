//! Cache-first loading against an authoritative remote.
//!
//! # Algorithm
//!
//! Each call to [`Reconciler::load`] is one independent run:
//!
//! 1. Publish `Started`
//! 2. Query the remote source and the cache concurrently
//! 3. Once both succeed, write the remote snapshot back into the cache:
//!    remove ids the remote no longer has, then upsert every remote record
//! 4. Meanwhile, race the two reads. A cache win is published right away;
//!    the remote snapshot is published whenever it arrives, or its failure
//! 5. Publish `Complete`
//!
//! Steps 3 and 4 run side by side; the write-back never delays what
//! subscribers see. Write-back failures are logged and otherwise ignored.
//!
//! Overlapping runs are neither serialized nor cancelled. Their snapshots reach
//! subscribers in the order the underlying reads settle.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::{self, BoxFuture, Either, Shared};
use futures::FutureExt;
use roster_engine::{Error, IdSet, Record, Result};
use tracing::Instrument;

use crate::cache::CacheStore;
use crate::event::{LoadEvent, Origin};
use crate::notifier::{EventReceiver, Notifier, SubscriptionId};
use crate::source::RemoteSource;

/// A settled snapshot, shared between the race and the write-back.
type Snapshot = Arc<Vec<Record>>;

/// A pending read that both subtasks of a run can await.
type Outcome = Shared<BoxFuture<'static, Result<Snapshot>>>;

/// Orchestrates load runs over a remote source and a cache.
pub struct Reconciler {
    remote: Arc<dyn RemoteSource>,
    cache: Arc<dyn CacheStore>,
    notifier: Arc<Notifier>,
    runs: AtomicU64,
}

impl Reconciler {
    /// Create a reconciler with its own notifier.
    pub fn new(remote: Arc<dyn RemoteSource>, cache: Arc<dyn CacheStore>) -> Self {
        Self::with_notifier(remote, cache, Arc::new(Notifier::new()))
    }

    /// Create a reconciler publishing into an existing notifier.
    pub fn with_notifier(
        remote: Arc<dyn RemoteSource>,
        cache: Arc<dyn CacheStore>,
        notifier: Arc<Notifier>,
    ) -> Self {
        Self {
            remote,
            cache,
            notifier,
            runs: AtomicU64::new(0),
        }
    }

    /// The notifier load events are published to.
    pub fn notifier(&self) -> &Arc<Notifier> {
        &self.notifier
    }

    /// Subscribe to load events.
    pub fn subscribe(&self) -> (SubscriptionId, EventReceiver) {
        self.notifier.subscribe()
    }

    /// Run one load.
    ///
    /// Resolves once `Complete` has been published and the cache write-back,
    /// if any, has finished. Never fails: problems are published as
    /// [`LoadEvent::Failed`] or logged.
    pub async fn load(&self) {
        let run = self.runs.fetch_add(1, Ordering::Relaxed) + 1;

        async {
            tracing::debug!("Load started");
            self.notifier.publish(LoadEvent::Started);

            let remote: Outcome = {
                let source = Arc::clone(&self.remote);
                async move { source.fetch_all().await.map(Arc::new) }
                    .boxed()
                    .shared()
            };
            let cached: Outcome = {
                let cache = Arc::clone(&self.cache);
                async move { cache.read_all().await.map(Arc::new) }
                    .boxed()
                    .shared()
            };

            future::join(
                self.write_back(remote.clone(), cached.clone()),
                self.surface(remote, cached),
            )
            .await;
        }
        .instrument(tracing::info_span!("load", run))
        .await
    }

    /// Reconcile the cache toward the remote snapshot.
    async fn write_back(&self, remote: Outcome, cached: Outcome) {
        let (Ok(remote), Ok(cached)) = future::join(remote, cached).await else {
            tracing::debug!("Skipping cache write-back, a source failed");
            return;
        };

        let stale = stale_ids(&cached, &remote);
        if !stale.is_empty() {
            if let Err(e) = self.cache.remove(&stale).await {
                tracing::warn!(error = %e, "Failed to remove stale records from cache");
            }
        }

        match self.cache.upsert(&remote).await {
            Ok(()) => tracing::debug!(
                removed = stale.len(),
                upserted = remote.len(),
                "Cache reconciled with remote"
            ),
            Err(e) => tracing::warn!(error = %e, "Failed to write remote records to cache"),
        }
    }

    /// Publish the fastest usable snapshot, then the authoritative one.
    async fn surface(&self, remote: Outcome, cached: Outcome) {
        match race(remote.clone(), cached).await {
            Ok((Origin::Cache, records)) => {
                self.publish_records(Origin::Cache, records);
                match remote.await {
                    Ok(records) => self.publish_records(Origin::Remote, records),
                    Err(error) => self.publish_failure(error),
                }
            }
            Ok((Origin::Remote, records)) => self.publish_records(Origin::Remote, records),
            Err(error) => self.publish_failure(error),
        }

        tracing::debug!("Load complete");
        self.notifier.publish(LoadEvent::Complete);
    }

    fn publish_records(&self, origin: Origin, records: Snapshot) {
        tracing::debug!(%origin, count = records.len(), "Publishing records");
        self.notifier.publish(LoadEvent::Records { origin, records });
    }

    fn publish_failure(&self, error: Error) {
        tracing::warn!(error = %error, "Load failed");
        self.notifier.publish(LoadEvent::Failed(error));
    }
}

/// First successful read wins. Fails only when both reads fail.
async fn race(remote: Outcome, cached: Outcome) -> Result<(Origin, Snapshot)> {
    match future::select(remote, cached).await {
        Either::Left((Ok(records), _)) => Ok((Origin::Remote, records)),
        Either::Right((Ok(records), _)) => Ok((Origin::Cache, records)),
        Either::Left((Err(remote_err), cached)) => cached
            .await
            .map(|records| (Origin::Cache, records))
            .map_err(|cache_err| Error::all_failed(remote_err, cache_err)),
        Either::Right((Err(cache_err), remote)) => remote
            .await
            .map(|records| (Origin::Remote, records))
            .map_err(|remote_err| Error::all_failed(remote_err, cache_err)),
    }
}

/// Ids present in the cache but absent from the remote snapshot.
pub fn stale_ids(cached: &[Record], remote: &[Record]) -> IdSet {
    let remote_ids: IdSet = remote.iter().map(|r| r.id().clone()).collect();
    cached
        .iter()
        .map(Record::id)
        .filter(|id| !remote_ids.contains(*id))
        .cloned()
        .collect()
}
