//! Cursor value type for Vista.
//!
//! This module defines the `CursorValue` enum, the totally ordered value
//! used as the sort and pagination key for a loaded record set.

use alloc::string::String;
use core::fmt;

/// A totally ordered pagination key.
///
/// The derived `Ord` gives cross-variant ordering by declaration rank
/// (Int64 < Timestamp < String) and natural ordering within a variant.
/// A loaded set always compares cursors of a single variant in practice,
/// but the total order keeps mixed batches well-defined.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CursorValue {
    /// 64-bit signed integer key
    Int64(i64),
    /// Unix timestamp in milliseconds
    Timestamp(i64),
    /// UTF-8 string key (e.g. a ULID or UUID)
    String(String),
}

impl CursorValue {
    /// Returns the i64 value if this is an Int64, None otherwise.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CursorValue::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the timestamp in milliseconds if this is a Timestamp, None otherwise.
    pub fn as_timestamp(&self) -> Option<i64> {
        match self {
            CursorValue::Timestamp(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the string value if this is a String, None otherwise.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CursorValue::String(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for CursorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CursorValue::Int64(v) => write!(f, "{}", v),
            CursorValue::Timestamp(v) => write!(f, "@{}", v),
            CursorValue::String(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for CursorValue {
    fn from(v: i64) -> Self {
        CursorValue::Int64(v)
    }
}

impl From<&str> for CursorValue {
    fn from(v: &str) -> Self {
        CursorValue::String(v.into())
    }
}

impl From<String> for CursorValue {
    fn from(v: String) -> Self {
        CursorValue::String(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_cursor_order_within_variant() {
        assert!(CursorValue::Int64(1) < CursorValue::Int64(2));
        assert!(CursorValue::Timestamp(100) < CursorValue::Timestamp(200));
        assert!(CursorValue::from("a") < CursorValue::from("b"));
    }

    #[test]
    fn test_cursor_order_across_variants() {
        // Variant rank: Int64 < Timestamp < String
        assert!(CursorValue::Int64(i64::MAX) < CursorValue::Timestamp(0));
        assert!(CursorValue::Timestamp(i64::MAX) < CursorValue::from(""));
    }

    #[test]
    fn test_cursor_accessors() {
        assert_eq!(CursorValue::Int64(7).as_i64(), Some(7));
        assert_eq!(CursorValue::Int64(7).as_str(), None);
        assert_eq!(CursorValue::Timestamp(9).as_timestamp(), Some(9));
        assert_eq!(CursorValue::from("x").as_str(), Some("x"));
    }

    #[test]
    fn test_cursor_display() {
        assert_eq!(CursorValue::Int64(42).to_string(), "42");
        assert_eq!(CursorValue::Timestamp(42).to_string(), "@42");
        assert_eq!(CursorValue::from("abc").to_string(), "abc");
    }
}
