//! In-process cache for tests and ephemeral runs.

use async_trait::async_trait;
use dashmap::DashMap;
use roster_engine::{IdSet, Record, RecordId, Result};

use super::CacheStore;

/// Non-durable cache backed by a concurrent map.
#[derive(Debug, Default)]
pub struct MemoryCache {
    records: DashMap<RecordId, Record>,
}

impl MemoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    /// Create a cache pre-populated with records.
    #[must_use]
    pub fn with_records(records: impl IntoIterator<Item = Record>) -> Self {
        let cache = Self::new();
        for record in records {
            cache.records.insert(record.id().clone(), record);
        }
        cache
    }

    /// Get a cached record by id.
    #[must_use]
    pub fn get(&self, id: &RecordId) -> Option<Record> {
        self.records.get(id).map(|r| r.value().clone())
    }

    /// All cached ids.
    #[must_use]
    pub fn ids(&self) -> IdSet {
        self.records.iter().map(|r| r.key().clone()).collect()
    }

    /// Get current record count
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn read_all(&self) -> Result<Vec<Record>> {
        Ok(self.records.iter().map(|r| r.value().clone()).collect())
    }

    async fn upsert(&self, records: &[Record]) -> Result<()> {
        for record in records {
            self.records.insert(record.id().clone(), record.clone());
        }
        Ok(())
    }

    async fn remove(&self, ids: &IdSet) -> Result<()> {
        for id in ids {
            self.records.remove(id);
        }
        Ok(())
    }
}
