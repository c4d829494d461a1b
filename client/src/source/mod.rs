//! The authoritative remote source of records.

mod http;

pub use http::HttpSource;

use async_trait::async_trait;
use roster_engine::{Record, Result};

/// Capability to fetch the full, authoritative record set.
///
/// Transport and status failures are reported as
/// [`Error::SourceUnavailable`](roster_engine::Error::SourceUnavailable);
/// undecodable payloads as
/// [`Error::MalformedRecord`](roster_engine::Error::MalformedRecord).
#[async_trait]
pub trait RemoteSource: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Record>>;
}
