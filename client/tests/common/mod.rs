//! Shared test doubles for the client integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use roster_client::{CacheStore, EventReceiver, LoadEvent, MemoryCache, Origin, RemoteSource};
use roster_engine::{ChangeSink, Changeset, Error, IdSet, Record, RecordId, Result};
use serde_json::json;

/// How long the slower source waits before answering.
pub const SLOW: Duration = Duration::from_millis(50);

pub fn user(id: i64, email: &str) -> Record {
    Record::from_value(json!({"id": id, "email": email})).unwrap()
}

pub fn users(ids: &[i64]) -> Vec<Record> {
    ids.iter()
        .map(|id| user(*id, &format!("user{}@x", id)))
        .collect()
}

pub fn ids(values: &[i64]) -> IdSet {
    values.iter().copied().map(RecordId::from).collect()
}

// ============================================================================
// Remote
// ============================================================================

/// A remote source answering with a fixed result after an optional delay.
pub struct StubSource {
    result: Result<Vec<Record>>,
    delay: Duration,
    calls: AtomicUsize,
}

impl StubSource {
    pub fn ok(records: Vec<Record>) -> Self {
        Self {
            result: Ok(records),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(Error::SourceUnavailable(message.to_string())),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteSource for StubSource {
    async fn fetch_all(&self) -> Result<Vec<Record>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.result.clone()
    }
}

// ============================================================================
// Cache
// ============================================================================

/// A write made against [`RecordingCache`].
#[derive(Debug, Clone, PartialEq)]
pub enum CacheCall {
    Remove(IdSet),
    Upsert(Vec<RecordId>),
}

/// A memory cache that records writes and can be slowed down or broken.
#[derive(Default)]
pub struct RecordingCache {
    inner: MemoryCache,
    read_delay: Duration,
    fail_reads: bool,
    fail_writes: bool,
    calls: Mutex<Vec<CacheCall>>,
}

impl RecordingCache {
    pub fn with_records(records: Vec<Record>) -> Self {
        Self {
            inner: MemoryCache::with_records(records),
            ..Self::default()
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.read_delay = delay;
        self
    }

    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn calls(&self) -> Vec<CacheCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn ids(&self) -> IdSet {
        self.inner.ids()
    }

    pub fn get(&self, id: i64) -> Option<Record> {
        self.inner.get(&RecordId::from(id))
    }
}

#[async_trait]
impl CacheStore for RecordingCache {
    async fn read_all(&self) -> Result<Vec<Record>> {
        if !self.read_delay.is_zero() {
            tokio::time::sleep(self.read_delay).await;
        }
        if self.fail_reads {
            return Err(Error::CacheUnavailable("database is locked".into()));
        }
        self.inner.read_all().await
    }

    async fn upsert(&self, records: &[Record]) -> Result<()> {
        self.calls.lock().unwrap().push(CacheCall::Upsert(
            records.iter().map(|r| r.id().clone()).collect(),
        ));
        if self.fail_writes {
            return Err(Error::CacheUnavailable("disk full".into()));
        }
        self.inner.upsert(records).await
    }

    async fn remove(&self, ids: &IdSet) -> Result<()> {
        self.calls.lock().unwrap().push(CacheCall::Remove(ids.clone()));
        if self.fail_writes {
            return Err(Error::CacheUnavailable("disk full".into()));
        }
        self.inner.remove(ids).await
    }
}

// ============================================================================
// Observers
// ============================================================================

/// Everything buffered on a subscription so far.
pub fn drain(rx: &mut EventReceiver) -> Vec<LoadEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Compact form of an event for sequence assertions.
#[derive(Debug, Clone, PartialEq)]
pub enum Seen {
    Started,
    Records(Origin, Vec<String>),
    Failed(Error),
    Complete,
}

pub fn seen(events: &[LoadEvent]) -> Vec<Seen> {
    events
        .iter()
        .map(|event| match event {
            LoadEvent::Started => Seen::Started,
            LoadEvent::Records { origin, records } => Seen::Records(
                *origin,
                records.iter().map(|r| r.display("email")).collect(),
            ),
            LoadEvent::Failed(error) => Seen::Failed(error.clone()),
            LoadEvent::Complete => Seen::Complete,
        })
        .collect()
}

/// A sink that keeps every callback it receives, shareable with the test.
#[derive(Clone, Default)]
pub struct RecordingSink {
    pub log: Arc<Mutex<Vec<String>>>,
    pub changesets: Arc<Mutex<Vec<Changeset>>>,
}

impl RecordingSink {
    pub fn log(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    pub fn changesets(&self) -> Vec<Changeset> {
        self.changesets.lock().unwrap().clone()
    }
}

impl ChangeSink for RecordingSink {
    fn apply(&mut self, changeset: &Changeset) {
        let mut emails: Vec<_> = changeset
            .all
            .records()
            .map(|r| r.display("email"))
            .collect();
        emails.sort();
        self.log
            .lock()
            .unwrap()
            .push(format!("apply {}", emails.join(",")));
        self.changesets.lock().unwrap().push(changeset.clone());
    }

    fn load_started(&mut self) {
        self.log.lock().unwrap().push("started".into());
    }

    fn load_failed(&mut self, error: &Error) {
        self.log.lock().unwrap().push(format!("failed {}", error));
    }

    fn load_completed(&mut self) {
        self.log.lock().unwrap().push("completed".into());
    }
}
