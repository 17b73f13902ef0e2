//! Merge event types.
//!
//! Incoming changes are expressed as one tagged union consumed by a single
//! reducer (`LoadedSet::apply`), instead of separate snapshot/delta/page
//! callback paths.

use alloc::vec::Vec;
use vista_core::{Record, RecordId};

/// A single record update within a delta: the new value, and the previous
/// value when the collaborator knows it.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordUpdate {
    pub previous: Option<Record>,
    pub current: Record,
}

impl RecordUpdate {
    /// Creates an update carrying only the new value.
    pub fn new(current: Record) -> Self {
        Self {
            previous: None,
            current,
        }
    }

    /// Creates an update carrying both old and new values.
    pub fn with_previous(previous: Record, current: Record) -> Self {
        Self {
            previous: Some(previous),
            current,
        }
    }
}

/// An incremental change set delivered by a live subscription.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeltaBatch {
    /// Records that were inserted remotely.
    pub added: Vec<Record>,
    /// Records that were updated remotely.
    pub updated: Vec<RecordUpdate>,
    /// Ids of records that were removed remotely.
    pub removed: Vec<RecordId>,
}

impl DeltaBatch {
    /// Creates an empty delta batch.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the batch carries no changes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }

    /// Returns the total number of changes in the batch.
    #[inline]
    pub fn len(&self) -> usize {
        self.added.len() + self.updated.len() + self.removed.len()
    }

    /// Adds an inserted record.
    pub fn add(mut self, record: Record) -> Self {
        self.added.push(record);
        self
    }

    /// Adds an updated record.
    pub fn update(mut self, update: RecordUpdate) -> Self {
        self.updated.push(update);
        self
    }

    /// Adds a removed record id.
    pub fn remove(mut self, id: impl Into<RecordId>) -> Self {
        self.removed.push(id.into());
        self
    }
}

/// An event folded into the loaded set.
#[derive(Clone, Debug, PartialEq)]
pub enum MergeEvent {
    /// Full result set from a live subscription, authoritative for the
    /// subscription's scope.
    Snapshot { rows: Vec<Record> },
    /// Incremental changes from a live subscription.
    Delta(DeltaBatch),
    /// Rows returned by an on-demand page fetch beyond the watermark.
    Page { rows: Vec<Record> },
}

#[cfg(test)]
mod tests {
    use super::*;
    use vista_core::Record;

    #[test]
    fn test_delta_batch_builders() {
        let batch = DeltaBatch::new()
            .add(Record::new("a", 1i64))
            .update(RecordUpdate::new(Record::new("b", 2i64)))
            .remove("c");

        assert_eq!(batch.len(), 3);
        assert!(!batch.is_empty());
        assert_eq!(batch.added[0].id(), "a");
        assert_eq!(batch.updated[0].current.id(), "b");
        assert_eq!(batch.removed[0], "c");
    }

    #[test]
    fn test_delta_batch_empty() {
        let batch = DeltaBatch::new();
        assert!(batch.is_empty());
        assert_eq!(batch.len(), 0);
    }

    #[test]
    fn test_record_update_with_previous() {
        let update = RecordUpdate::with_previous(Record::new("a", 1i64), Record::new("a", 2i64));
        assert_eq!(update.previous.as_ref().unwrap().cursor().as_i64(), Some(1));
        assert_eq!(update.current.cursor().as_i64(), Some(2));
    }
}
