//! Vista Core - Record and cursor types for the Vista view engine.
//!
//! This crate provides the foundational types for Vista's incremental
//! view reconciliation:
//!
//! - `CursorValue`: the totally ordered key used for sorting and pagination
//! - `Record` / `RawRecord`: a record with a unique id and a cursor field,
//!   plus the unvalidated form delivered by a storage collaborator
//! - `Error`: error types for subscription, fetch, and validation failures
//!
//! # Example
//!
//! ```rust
//! use vista_core::{CursorValue, RawRecord, Record};
//!
//! let raw = RawRecord::new(Some("a".into()), Some(CursorValue::Int64(1)));
//! let record: Record = raw.validate().unwrap();
//!
//! assert_eq!(record.id(), "a");
//! assert_eq!(record.cursor(), &CursorValue::Int64(1));
//! ```

#![no_std]

extern crate alloc;

mod error;
mod record;
mod value;

pub use error::{Error, Result, ValidationReason};
pub use record::{validate_batch, FieldValue, RawRecord, Record, RecordId};
pub use value::CursorValue;
