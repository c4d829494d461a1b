//! # Roster Client
//!
//! Keeps a local view of the remote user collection in sync with a durable
//! cache, feeding the fastest available snapshot to the
//! [`roster_engine`] model and then the authoritative one.
//!
//! ## Pieces
//!
//! - [`RemoteSource`] - the authoritative source ([`HttpSource`])
//! - [`CacheStore`] - the local cache ([`SqliteCache`], [`MemoryCache`])
//! - [`Reconciler`] - races both sources and writes the remote back to the cache
//! - [`Notifier`] - delivers [`LoadEvent`]s to subscribers
//! - [`App`] - composition root applying events to a model and a sink
//! - [`ListView`] - a headless list sink

pub mod app;
pub mod cache;
pub mod config;
pub mod error;
pub mod event;
pub mod notifier;
pub mod reconciler;
pub mod source;
pub mod view;

pub use app::{App, LoadStatus};
pub use cache::{CacheStore, MemoryCache, SqliteCache};
pub use config::{Config, ConfigError};
pub use error::{ClientError, Result};
pub use event::{LoadEvent, Origin};
pub use notifier::{EventReceiver, Notifier, SubscriptionId};
pub use reconciler::Reconciler;
pub use source::{HttpSource, RemoteSource};
pub use view::{ListView, Row};
