//! Load run notifications.

use std::fmt;
use std::sync::Arc;

use roster_engine::{Error, Record};

/// Which source a batch of records came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// The authoritative remote source
    Remote,
    /// The local cache
    Cache,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Remote => f.write_str("remote"),
            Origin::Cache => f.write_str("cache"),
        }
    }
}

/// A notification emitted by a load run.
///
/// Within one run, `Started` comes first and `Complete` comes last; any
/// `Records` and `Failed` events fall in between.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadEvent {
    /// The run began; no I/O has happened yet.
    Started,
    /// A full snapshot of records from one source.
    Records {
        origin: Origin,
        records: Arc<Vec<Record>>,
    },
    /// The run could not obtain authoritative data.
    Failed(Error),
    /// The run is over.
    Complete,
}

impl LoadEvent {
    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            LoadEvent::Started => "load-started",
            LoadEvent::Records { .. } => "load-data",
            LoadEvent::Failed(_) => "load-error",
            LoadEvent::Complete => "load-complete",
        }
    }
}
