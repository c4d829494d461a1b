//! Error types for the Roster engine.

use thiserror::Error;

/// All failures a load run can surface.
///
/// Messages are captured as strings at the adapter boundary so a single failure
/// can be cloned out to every subscriber of a run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    // Source errors
    #[error("remote source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("cache unavailable: {0}")]
    CacheUnavailable(String),

    #[error("malformed record: {0}")]
    MalformedRecord(String),

    // Race errors
    #[error("all sources failed (remote: {remote}; cache: {cache})")]
    AllSourcesFailed {
        remote: Box<Error>,
        cache: Box<Error>,
    },
}

impl Error {
    /// Combine the two losing outcomes of a race.
    pub fn all_failed(remote: Error, cache: Error) -> Self {
        Error::AllSourcesFailed {
            remote: Box::new(remote),
            cache: Box::new(cache),
        }
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
