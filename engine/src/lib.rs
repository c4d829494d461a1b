//! # Roster Engine
//!
//! The I/O-free core of Roster: the canonical record collection, structural
//! diffing, and the changesets handed to renderers.
//!
//! ## Design Principles
//!
//! - **No IO**: the engine knows nothing about HTTP, storage or runtimes
//! - **Silent when unchanged**: an update that changes nothing emits nothing
//! - **Immutable snapshots**: emitted changesets share, never copy or mutate, state
//!
//! ## Core Concepts
//!
//! ### Records
//!
//! A [`Record`] is a JSON object with an `id` field. Identity is the id; value
//! equality is deep [structural equality](equality) over every field.
//!
//! ### Model
//!
//! [`CollectionModel`] owns the current [`Collection`]. Feeding it a new
//! snapshot produces a [`Changeset`] naming the added, removed and updated ids,
//! or `None` when the snapshot is structurally identical.
//!
//! ### Sinks
//!
//! A [`ChangeSink`] applies changesets incrementally, touching only the ids a
//! changeset names.
//!
//! ## Quick Start
//!
//! ```rust
//! use roster_engine::{CollectionModel, Record, RecordId};
//! use serde_json::json;
//!
//! let mut model = CollectionModel::new();
//!
//! let first = vec![
//!     Record::from_value(json!({"id": 1, "email": "a@example.com"})).unwrap(),
//!     Record::from_value(json!({"id": 2, "email": "b@example.com"})).unwrap(),
//! ];
//! let changeset = model.update(first).unwrap();
//! assert_eq!(changeset.added.len(), 2);
//!
//! let second = vec![
//!     Record::from_value(json!({"email": "b@example.com", "id": 2})).unwrap(),
//!     Record::from_value(json!({"id": 3, "email": "c@example.com"})).unwrap(),
//! ];
//! let changeset = model.update(second).unwrap();
//! assert!(changeset.added.contains(&RecordId::from(3)));
//! assert!(changeset.removed.contains(&RecordId::from(1)));
//! assert!(changeset.updated.is_empty());
//! ```

pub mod changeset;
pub mod collection;
pub mod equality;
pub mod error;
pub mod model;
pub mod record;

// Re-export main types at crate root
pub use changeset::{ChangeSink, Changeset};
pub use collection::{Collection, IdSet};
pub use equality::{equal, Structural};
pub use error::{Error, Result};
pub use model::CollectionModel;
pub use record::{Record, RecordId, ID_FIELD};
