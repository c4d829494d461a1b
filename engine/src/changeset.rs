//! Changesets and the sinks that consume them.

use crate::{Collection, Error, IdSet, RecordId};
use std::sync::Arc;

/// An immutable description of one change to the canonical collection.
///
/// `all` is the complete collection after the change, not just the changed
/// entries. Sinks should only touch the ids named in `added`, `removed` and
/// `updated`, and read current values from `all`.
#[derive(Debug, Clone, PartialEq)]
pub struct Changeset {
    pub all: Arc<Collection>,
    pub added: IdSet,
    pub removed: IdSet,
    pub updated: IdSet,
}

impl Changeset {
    /// Total number of changed ids.
    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len() + self.updated.len()
    }

    /// True when nothing changed. Emitted changesets are never empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the given id is touched by this changeset.
    pub fn touches(&self, id: &RecordId) -> bool {
        self.added.contains(id) || self.removed.contains(id) || self.updated.contains(id)
    }
}

/// Consumer of changesets, typically an incremental list renderer.
///
/// Only [`ChangeSink::apply`] is required. The status hooks let a renderer show
/// a pending state and an error label around a load run.
pub trait ChangeSink {
    /// Apply one changeset.
    fn apply(&mut self, changeset: &Changeset);

    /// A load run has started.
    fn load_started(&mut self) {}

    /// A load run reported a failure.
    fn load_failed(&mut self, _error: &Error) {}

    /// A load run finished, successfully or not.
    fn load_completed(&mut self) {}
}

impl<S: ChangeSink + ?Sized> ChangeSink for Box<S> {
    fn apply(&mut self, changeset: &Changeset) {
        (**self).apply(changeset)
    }

    fn load_started(&mut self) {
        (**self).load_started()
    }

    fn load_failed(&mut self, error: &Error) {
        (**self).load_failed(error)
    }

    fn load_completed(&mut self) {
        (**self).load_completed()
    }
}
