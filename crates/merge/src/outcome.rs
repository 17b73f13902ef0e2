//! Merge outcome summary.
//!
//! Each application of a `MergeEvent` produces a `MergeOutcome` describing
//! what actually changed in the loaded set, for notifying view subscribers
//! without diffing the whole sequence again.

use alloc::vec::Vec;
use vista_core::{CursorValue, Record};

/// A summary of changes produced by one merge event.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MergeOutcome {
    /// Records newly present in the loaded set.
    pub added: Vec<Record>,
    /// Records no longer present in the loaded set.
    pub removed: Vec<Record>,
    /// Records replaced in place (old, new).
    pub updated: Vec<(Record, Record)>,
    /// The maximum cursor among the rows of a page event, present only for
    /// non-empty page events. The live layer advances the watermark from it.
    pub max_page_cursor: Option<CursorValue>,
}

impl MergeOutcome {
    /// Creates an empty outcome.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the event changed nothing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.updated.is_empty()
    }

    /// Returns the total number of changes.
    #[inline]
    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len() + self.updated.len()
    }
}
