//! The local durable cache of records.

mod memory;
mod sqlite;

pub use memory::MemoryCache;
pub use sqlite::SqliteCache;

use async_trait::async_trait;
use roster_engine::{IdSet, Record, Result};

/// Keyed local store of records.
///
/// Failures are reported as
/// [`Error::CacheUnavailable`](roster_engine::Error::CacheUnavailable).
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Read every cached record.
    async fn read_all(&self) -> Result<Vec<Record>>;

    /// Insert records, replacing any cached record with the same id.
    async fn upsert(&self, records: &[Record]) -> Result<()>;

    /// Delete the records with the given ids. Unknown ids are ignored.
    async fn remove(&self, ids: &IdSet) -> Result<()>;
}
