//! Collection - the keyed set of records.

use crate::{Record, RecordId};
use std::collections::{BTreeSet, HashMap};

/// A set of identifiers, kept ordered so changesets are deterministic.
pub type IdSet = BTreeSet<RecordId>;

/// A collection of records keyed by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    records: HashMap<RecordId, Record>,
}

impl Collection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
        }
    }

    /// Index records by id. When an id repeats, the last record wins.
    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Self {
        let mut collection = Self::new();
        for record in records {
            collection.insert(record);
        }
        collection
    }

    /// Get a record by ID.
    pub fn get(&self, id: &RecordId) -> Option<&Record> {
        self.records.get(id)
    }

    /// Insert a record, replacing any record with the same id.
    pub fn insert(&mut self, record: Record) {
        self.records.insert(record.id().clone(), record);
    }

    /// Check if a record exists.
    pub fn contains(&self, id: &RecordId) -> bool {
        self.records.contains_key(id)
    }

    /// Iterate over all records in no particular order.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    /// All ids in the collection.
    pub fn ids(&self) -> IdSet {
        self.records.keys().cloned().collect()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if collection is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<Record> for Collection {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::from_records(iter)
    }
}
