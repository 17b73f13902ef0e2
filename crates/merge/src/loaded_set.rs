//! The loaded set: a sorted, deduplicated view of the records loaded so far.
//!
//! `LoadedSet` is the single reducer for all three event kinds. After any
//! event the set holds unique ids in ascending cursor order; both properties
//! are restored by one O(n) normalization pass per event.

use crate::event::{DeltaBatch, MergeEvent};
use crate::outcome::MergeOutcome;
use alloc::string::ToString;
use alloc::vec::Vec;
use core::mem;
use hashbrown::{HashMap, HashSet};
use vista_core::{CursorValue, Record, RecordId};

/// An ordered, deduplicated sequence of loaded records.
#[derive(Debug, Default)]
pub struct LoadedSet {
    records: Vec<Record>,
}

impl LoadedSet {
    /// Creates an empty loaded set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the records, sorted ascending by cursor.
    #[inline]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Returns the number of loaded records.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing is loaded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns true if a record with the given id is loaded.
    pub fn contains(&self, id: &str) -> bool {
        self.records.iter().any(|r| r.id() == id)
    }

    /// Looks up a record by id.
    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Returns the position of the record with the given id.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }

    /// Returns the highest loaded cursor, if any.
    pub fn max_cursor(&self) -> Option<&CursorValue> {
        self.records.last().map(|r| r.cursor())
    }

    /// Drops all loaded records. Used only on full reinitialization.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Folds one event into the set and reports what changed.
    pub fn apply(&mut self, event: MergeEvent) -> MergeOutcome {
        match event {
            MergeEvent::Snapshot { rows } => self.apply_snapshot(rows),
            MergeEvent::Delta(batch) => self.apply_delta(batch),
            MergeEvent::Page { rows } => self.apply_page(rows),
        }
    }

    /// A snapshot is authoritative for the subscription's scope, which by
    /// construction covers the whole loaded range, so it replaces the set.
    /// Applying the same snapshot twice yields the same set.
    fn apply_snapshot(&mut self, rows: Vec<Record>) -> MergeOutcome {
        let old = self.by_id();
        self.records = Self::normalize(rows);

        let mut outcome = MergeOutcome::new();
        self.diff_against(old, &mut outcome);
        outcome
    }

    /// Applies a delta in strict order: updates, then removals, then adds.
    /// The order matters: an update must not be lost to a later duplicate
    /// add, and a removal must land before a same-id re-insertion.
    fn apply_delta(&mut self, batch: DeltaBatch) -> MergeOutcome {
        let mut outcome = MergeOutcome::new();

        // 1. Replace every existing record matching an updated id.
        for update in batch.updated {
            if let Some(pos) = self
                .records
                .iter()
                .position(|r| r.id() == update.current.id())
            {
                let old = mem::replace(&mut self.records[pos], update.current);
                if old != self.records[pos] {
                    outcome.updated.push((old, self.records[pos].clone()));
                }
            }
        }

        // 2. Remove every record matching a removed id.
        let removed_ids: HashSet<&str> = batch.removed.iter().map(|id| id.as_str()).collect();
        if !removed_ids.is_empty() {
            self.records.retain(|r| {
                if removed_ids.contains(r.id()) {
                    outcome.removed.push(r.clone());
                    false
                } else {
                    true
                }
            });
        }

        // 3. Append added records whose id is not already present; among
        //    duplicates within the batch itself the last one wins.
        let existing: HashSet<RecordId> =
            self.records.iter().map(|r| r.id().to_string()).collect();
        let mut pending: Vec<Record> = Vec::new();
        let mut pending_idx: HashMap<RecordId, usize> = HashMap::new();
        for record in batch.added {
            if existing.contains(record.id()) {
                continue;
            }
            match pending_idx.get(record.id()) {
                Some(&i) => pending[i] = record,
                None => {
                    pending_idx.insert(record.id().to_string(), pending.len());
                    pending.push(record);
                }
            }
        }
        outcome.added = pending.clone();
        self.records.extend(pending);

        self.records = Self::normalize(mem::take(&mut self.records));
        outcome
    }

    /// Appends page rows unconditionally, then dedups (last-seen wins, so a
    /// re-fetched row refreshes a stale copy) and re-sorts.
    fn apply_page(&mut self, rows: Vec<Record>) -> MergeOutcome {
        let mut outcome = MergeOutcome::new();
        outcome.max_page_cursor = rows.iter().map(|r| r.cursor().clone()).max();

        let old = self.by_id();
        let mut combined = mem::take(&mut self.records);
        combined.extend(rows);
        self.records = Self::normalize(combined);

        self.diff_against(old, &mut outcome);
        outcome
    }

    /// Dedups by id (last-seen wins, preserving first-seen position) and
    /// stable-sorts ascending by cursor.
    fn normalize(records: Vec<Record>) -> Vec<Record> {
        let mut out: Vec<Record> = Vec::with_capacity(records.len());
        let mut index: HashMap<RecordId, usize> = HashMap::with_capacity(records.len());
        for record in records {
            match index.get(record.id()) {
                Some(&i) => out[i] = record,
                None => {
                    index.insert(record.id().to_string(), out.len());
                    out.push(record);
                }
            }
        }
        out.sort_by(|a, b| a.cursor().cmp(b.cursor()));
        out
    }

    /// Snapshots the current records into an id-keyed map.
    fn by_id(&self) -> HashMap<RecordId, Record> {
        self.records
            .iter()
            .map(|r| (r.id().to_string(), r.clone()))
            .collect()
    }

    /// Fills `outcome` with the difference between `old` and the current set.
    fn diff_against(&self, mut old: HashMap<RecordId, Record>, outcome: &mut MergeOutcome) {
        for record in &self.records {
            match old.remove(record.id()) {
                None => outcome.added.push(record.clone()),
                Some(previous) => {
                    if &previous != record {
                        outcome.updated.push((previous, record.clone()));
                    }
                }
            }
        }
        let mut leftovers: Vec<Record> = old.into_values().collect();
        leftovers.sort_by(|a, b| a.cursor().cmp(b.cursor()));
        outcome.removed.extend(leftovers);
    }
}
