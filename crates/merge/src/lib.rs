//! Vista Merge - the reconciliation core of the Vista view engine.
//!
//! This crate folds the three kinds of incoming change events into a single
//! canonical in-memory sequence:
//!
//! - `MergeEvent::Snapshot`: the full result set delivered by a live
//!   subscription at creation or re-evaluation
//! - `MergeEvent::Delta`: an incremental added/updated/removed change set
//! - `MergeEvent::Page`: a one-shot bounded fetch beyond the watermark
//!
//! The `LoadedSet` guarantees that after any event its records are unique
//! by id and sorted ascending by cursor. All merge logic is synchronous and
//! pure with respect to I/O, so it is testable without any live backend.
//!
//! # Example
//!
//! ```rust
//! use vista_core::Record;
//! use vista_merge::{LoadedSet, MergeEvent};
//!
//! let mut set = LoadedSet::new();
//! let outcome = set.apply(MergeEvent::Snapshot {
//!     rows: vec![Record::new("b", 2i64), Record::new("a", 1i64)],
//! });
//!
//! assert_eq!(outcome.added.len(), 2);
//! assert_eq!(set.records()[0].id(), "a");
//! ```

#![no_std]

extern crate alloc;

mod event;
mod loaded_set;
mod outcome;

pub use event::{DeltaBatch, MergeEvent, RecordUpdate};
pub use loaded_set::LoadedSet;
pub use outcome::MergeOutcome;
