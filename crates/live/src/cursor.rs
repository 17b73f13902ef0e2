//! Cursor tracker: the pagination watermark.
//!
//! The watermark is the highest cursor value known to be contiguously
//! loaded from the start of the ordering. It only ever moves forward.

use vista_core::CursorValue;

/// Tracks the pagination watermark.
#[derive(Clone, Debug, Default)]
pub struct CursorTracker {
    watermark: Option<CursorValue>,
}

impl CursorTracker {
    /// Creates a tracker with no watermark (nothing loaded).
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current watermark, or None when unset.
    #[inline]
    pub fn get(&self) -> Option<&CursorValue> {
        self.watermark.as_ref()
    }

    /// Returns true once the watermark has been set.
    #[inline]
    pub fn is_set(&self) -> bool {
        self.watermark.is_some()
    }

    /// Advances the watermark to `value` only if it is strictly greater
    /// than the current one. Regressions are a no-op. Returns whether the
    /// watermark moved.
    pub fn advance(&mut self, value: CursorValue) -> bool {
        match &self.watermark {
            Some(current) if *current >= value => false,
            _ => {
                self.watermark = Some(value);
                true
            }
        }
    }

    /// Clears the watermark. Used only on full reinitialization.
    pub fn reset(&mut self) {
        self.watermark = None;
    }
}
