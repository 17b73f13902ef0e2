//! Record types for Vista.
//!
//! A `Record` is the validated unit of the loaded set: a unique string id,
//! a cursor used for ordering, and an opaque bag of fields the engine never
//! interprets. Collaborators deliver `RawRecord`s, which are validated at
//! the boundary.

use crate::error::{Error, Result, ValidationReason};
use crate::value::CursorValue;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

/// Unique identifier for a record.
pub type RecordId = String;

/// An opaque scalar field value carried through the view untouched.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

/// A validated record in the loaded set.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    id: RecordId,
    cursor: CursorValue,
    /// Remaining fields, keyed by name. Schema-agnostic.
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    /// Creates a record with no extra fields.
    pub fn new(id: impl Into<RecordId>, cursor: impl Into<CursorValue>) -> Self {
        Self {
            id: id.into(),
            cursor: cursor.into(),
            fields: Vec::new(),
        }
    }

    /// Creates a record with extra fields.
    pub fn with_fields(
        id: impl Into<RecordId>,
        cursor: impl Into<CursorValue>,
        fields: Vec<(String, FieldValue)>,
    ) -> Self {
        Self {
            id: id.into(),
            cursor: cursor.into(),
            fields,
        }
    }

    /// Returns the record id.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the cursor value.
    #[inline]
    pub fn cursor(&self) -> &CursorValue {
        &self.cursor
    }

    /// Returns the opaque fields.
    #[inline]
    pub fn fields(&self) -> &[(String, FieldValue)] {
        &self.fields
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }
}

/// An unvalidated record as delivered by a storage collaborator.
#[derive(Clone, Debug, Default)]
pub struct RawRecord {
    pub id: Option<RecordId>,
    pub cursor: Option<CursorValue>,
    pub fields: Vec<(String, FieldValue)>,
}

impl RawRecord {
    /// Creates a raw record with no extra fields.
    pub fn new(id: Option<RecordId>, cursor: Option<CursorValue>) -> Self {
        Self {
            id,
            cursor,
            fields: Vec::new(),
        }
    }

    /// Validates the expected shape, producing a `Record`.
    pub fn validate(self) -> Result<Record> {
        let id = match self.id {
            Some(id) if !id.is_empty() => id,
            Some(_) => {
                return Err(Error::validation(ValidationReason::EmptyId, "record"));
            }
            None => {
                return Err(Error::validation(ValidationReason::MissingId, "record"));
            }
        };
        let cursor = self.cursor.ok_or_else(|| {
            Error::validation(ValidationReason::MissingCursor, format!("record {}", id))
        })?;
        Ok(Record {
            id,
            cursor,
            fields: self.fields,
        })
    }
}

impl From<Record> for RawRecord {
    fn from(r: Record) -> Self {
        Self {
            id: Some(r.id),
            cursor: Some(r.cursor),
            fields: r.fields,
        }
    }
}

/// Validates a batch, dropping records that fail the shape check.
///
/// Drops are logged and counted rather than aborting the whole batch; a
/// single bad record must not discard its neighbours.
pub fn validate_batch(raw: Vec<RawRecord>) -> (Vec<Record>, usize) {
    let mut records = Vec::with_capacity(raw.len());
    let mut dropped = 0;
    for r in raw {
        match r.validate() {
            Ok(record) => records.push(record),
            Err(err) => {
                log::warn!("dropping malformed record: {}", err);
                dropped += 1;
            }
        }
    }
    (records, dropped)
}
