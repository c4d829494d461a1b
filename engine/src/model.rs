//! The canonical collection and structural diffing.
//!
//! [`CollectionModel`] is the single owner of the current collection. Every
//! update either replaces it wholesale and yields a [`Changeset`], or leaves it
//! untouched and yields nothing.

use crate::{equality, Changeset, Collection, IdSet, Record};
use std::sync::Arc;

/// Owns the last known collection and diffs new snapshots against it.
#[derive(Debug, Clone, Default)]
pub struct CollectionModel {
    current: Arc<Collection>,
}

impl CollectionModel {
    /// Create a model holding an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current canonical collection.
    pub fn collection(&self) -> &Arc<Collection> {
        &self.current
    }

    /// Replace the collection with `records` if anything changed.
    ///
    /// Returns the changeset describing the change, or `None` when the new
    /// snapshot is structurally identical to the current one.
    pub fn update(&mut self, records: impl IntoIterator<Item = Record>) -> Option<Changeset> {
        let next = Arc::new(Collection::from_records(records));
        let (added, removed, updated) = diff(&self.current, &next);

        if added.is_empty() && removed.is_empty() && updated.is_empty() {
            return None;
        }

        self.current = Arc::clone(&next);
        Some(Changeset {
            all: next,
            added,
            removed,
            updated,
        })
    }
}

/// Compute `(added, removed, updated)` going from `old` to `new`.
pub fn diff(old: &Collection, new: &Collection) -> (IdSet, IdSet, IdSet) {
    let added = new
        .records()
        .map(Record::id)
        .filter(|id| !old.contains(id))
        .cloned()
        .collect();
    let removed = old
        .records()
        .map(Record::id)
        .filter(|id| !new.contains(id))
        .cloned()
        .collect();
    let updated = new
        .records()
        .filter(|record| {
            old.get(record.id())
                .is_some_and(|previous| !equality::equal(previous, *record))
        })
        .map(|record| record.id().clone())
        .collect();

    (added, removed, updated)
}
